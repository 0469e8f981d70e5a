//! Integration tests for the waitlist API.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;
use waitlist_api::{
    api::{create_router, AppState},
    notify::{NoopNotifier, Notifier, NotifyError},
    registrar::{Registrar, SignupRecord},
    store::{MemoryStore, RecordStore, StoreError},
};

/// Store whose every operation fails with a non-conflict error.
struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<SignupRecord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn insert(&self, _record: &SignupRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Notifier that always fails.
struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_welcome(&self, _record: &SignupRecord) -> Result<(), NotifyError> {
        Err(NotifyError::Api("delivery provider is down".into()))
    }
}

/// Create a test app state with an in-memory store and silent notifier.
fn create_test_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    AppState::new(
        Registrar::new(store.clone(), Arc::new(NoopNotifier)),
        store,
    )
}

fn signup_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/waitlist")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(create_test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let store = Arc::new(BrokenStore);
    let state = AppState::new(
        Registrar::new(store.clone(), Arc::new(NoopNotifier)),
        store,
    );
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn test_signup_then_duplicate() {
    let app = create_router(create_test_state());

    let response = app
        .clone()
        .oneshot(signup_request(r#"{"email":"a@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "added");

    let response = app
        .oneshot(signup_request(r#"{"email":"a@x.com"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "exists");
}

#[tokio::test]
async fn test_signup_with_optional_fields() {
    let app = create_router(create_test_state());

    let response = app
        .oneshot(signup_request(
            r#"{"email":"b@x.com","name":"Bo","occupation":"editor","portfolio":"https://bo.example"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "added");
}

#[tokio::test]
async fn test_invalid_email() {
    let app = create_router(create_test_state());

    for body in [r#"{"email":"not-an-email"}"#, r#"{"email":""}"#, r#"{}"#] {
        let response = app.clone().oneshot(signup_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["message"], "Invalid email");
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let app = create_router(create_test_state());

    let response = app
        .oneshot(signup_request("{not valid json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["message"], "Invalid email");
}

#[tokio::test]
async fn test_method_not_allowed() {
    let app = create_router(create_test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/waitlist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let store = Arc::new(BrokenStore);
    let state = AppState::new(
        Registrar::new(store.clone(), Arc::new(NoopNotifier)),
        store,
    );
    let app = create_router(state);

    let response = app
        .oneshot(signup_request(r#"{"email":"a@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["message"], "error");
    assert!(json["detail"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_notification_failure_still_added() {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        Registrar::new(store.clone(), Arc::new(FailingNotifier)),
        store.clone(),
    );
    let app = create_router(state);

    let response = app
        .oneshot(signup_request(r#"{"email":"a@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "added");
    assert_eq!(store.count().await, 1);
}

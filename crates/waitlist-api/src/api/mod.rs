//! HTTP API for the waitlist service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::registrar::Registrar;
use crate::store::RecordStore;
use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Signup registrar with its injected store and notifier
    pub registrar: Arc<Registrar>,
    /// Record store, probed by the health endpoint
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registrar: Registrar, store: Arc<dyn RecordStore>) -> Self {
        Self {
            registrar: Arc::new(registrar),
            store,
        }
    }
}

/// Create the API router.
///
/// Non-POST requests to the signup route get 405 from the method router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/waitlist", post(handlers::signup))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP request handlers.

use super::types::{HealthResponse, SignupRequest, SignupResponse};
use super::AppState;
use crate::error::RegistrarError;
use crate::registrar::Outcome;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::warn;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = state.store.health_check().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        store_healthy,
    })
}

/// Accept a waitlist signup.
///
/// A missing or malformed body is a validation failure, not a server
/// error; it is rejected before the registrar touches any collaborator.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, RegistrarError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected malformed signup body");
        RegistrarError::InvalidEmail
    })?;

    let outcome = state.registrar.register(request.into()).await?;

    let message = match outcome {
        Outcome::Added => "added",
        Outcome::AlreadyExists => "exists",
    };

    Ok(Json(SignupResponse {
        message: message.to_string(),
    }))
}

//! Error types for the registrar service.

use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Registrar error types.
///
/// `Added`/`AlreadyExists` are not errors; they live in
/// [`crate::registrar::Outcome`]. Notification failures never surface here.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Store operation failed: {0}")]
    Persistence(StoreError),
}

/// Error response body.
///
/// `message` is the stable machine-readable field; `detail` carries
/// diagnostic text on server errors only.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for RegistrarError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            RegistrarError::InvalidEmail => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "Invalid email".to_string(),
                    detail: None,
                },
            ),
            RegistrarError::Persistence(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    message: "error".to_string(),
                    detail: Some(e.to_string()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

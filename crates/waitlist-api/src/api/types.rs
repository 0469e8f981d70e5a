//! API request and response types.

use crate::registrar::Candidate;
use serde::{Deserialize, Serialize};

/// Waitlist signup request body.
///
/// Every field is optional at the wire level; the registrar decides
/// whether the email passes validation.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub occupation: Option<String>,

    #[serde(default)]
    pub portfolio: Option<String>,
}

impl From<SignupRequest> for Candidate {
    fn from(request: SignupRequest) -> Self {
        Candidate {
            email: request.email,
            name: request.name,
            occupation: request.occupation,
            portfolio: request.portfolio,
        }
    }
}

/// Signup response body. `message` is "added" or "exists".
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_healthy: bool,
}

//! Duplicate-safe signup registration.
//!
//! The registrar composes a [`RecordStore`] and a [`Notifier`]:
//! an advisory existence check, an authoritative insert arbitrated by the
//! store's uniqueness constraint, and a best-effort welcome notification
//! that never affects the outcome of the signup itself.

use crate::error::RegistrarError;
use crate::notify::Notifier;
use crate::store::{RecordStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// A persisted signup record.
///
/// Optional fields serialize as explicit `null` when absent so the stored
/// row always carries the full column set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRecord {
    /// Signup email, the unique key (treated as an opaque string)
    pub email: String,

    /// Display name, if provided
    pub name: Option<String>,

    /// Occupation, if provided
    pub occupation: Option<String>,

    /// Portfolio URL, if provided
    pub portfolio: Option<String>,

    /// When the signup was accepted
    pub joined_at: DateTime<Utc>,
}

/// An unvalidated signup candidate, as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub portfolio: Option<String>,
}

/// Result of a registration attempt. Both variants are caller-visible
/// successes; `AlreadyExists` makes repeated signups idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fresh record persisted (notification attempted, result irrelevant)
    Added,
    /// Record already present, detected by pre-check or constraint conflict
    AlreadyExists,
}

/// Signup registrar with injected collaborators.
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl Registrar {
    /// Create a new registrar.
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Register a signup candidate.
    ///
    /// At most one insert and at most one outbound notification per call;
    /// the notification is skipped on every non-`Added` path.
    pub async fn register(&self, candidate: Candidate) -> Result<Outcome, RegistrarError> {
        let record = validate(candidate)?;
        info!(email = %record.email, "Signup request received");

        // Advisory pre-check. Under concurrent requests for the same email
        // both callers can pass this; the insert below is the arbiter.
        match self.store.find_by_email(&record.email).await {
            Ok(Some(_)) => {
                info!(email = %record.email, "Already on waitlist (pre-check)");
                return Ok(Outcome::AlreadyExists);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(email = %record.email, error = %e, "Pre-check failed, relying on insert");
            }
        }

        // Authoritative insert, arbitrated by the store's unique key.
        match self.store.insert(&record).await {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                info!(email = %record.email, "Already on waitlist (unique constraint)");
                return Ok(Outcome::AlreadyExists);
            }
            Err(e) => {
                warn!(email = %record.email, error = %e, "Signup insert failed");
                return Err(RegistrarError::Persistence(e));
            }
        }

        // The signup is durable; a missing welcome email is acceptable
        // degradation, a lost signup is not.
        if let Err(e) = self.notifier.send_welcome(&record).await {
            warn!(email = %record.email, error = %e, "Welcome notification failed");
        }

        info!(email = %record.email, "Added new signup");
        Ok(Outcome::Added)
    }
}

/// Validate a candidate and normalize it into a record.
///
/// The email must be present and contain an `@`; no further shape is
/// imposed. Empty or whitespace-only optional fields normalize to `None`.
fn validate(candidate: Candidate) -> Result<SignupRecord, RegistrarError> {
    let email = candidate
        .email
        .filter(|e| !e.is_empty() && e.contains('@'))
        .ok_or(RegistrarError::InvalidEmail)?;

    Ok(SignupRecord {
        email,
        name: normalize_optional(candidate.name),
        occupation: normalize_optional(candidate.occupation),
        portfolio: normalize_optional(candidate.portfolio),
        joined_at: Utc::now(),
    })
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

//! Record store adapters with a uniqueness-conflict capability.

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::registrar::SignupRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same unique key already exists
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// The store could not be reached or did not answer
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the request for a non-uniqueness reason
    #[error("Store rejected request: {0}")]
    Rejected(String),
}

/// Keyed persistence for signup records.
///
/// `insert` must surface a duplicate key as [`StoreError::Conflict`]; the
/// registrar relies on that signal as the final arbiter under races.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by email. Advisory only; callers must still handle
    /// a conflict from `insert`.
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError>;

    /// Insert a record, failing with `Conflict` if the email is taken.
    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError>;

    /// Probe whether the store answers. Adapters without a cheap probe
    /// report healthy.
    async fn health_check(&self) -> bool {
        true
    }
}

/// Classify a store error payload as a uniqueness violation.
///
/// Matches the standard error code when the store provides one, with a
/// textual fallback for client versions that only surface a message.
pub fn is_unique_violation(code: Option<&str>, message: &str) -> bool {
    if code == Some(UNIQUE_VIOLATION_CODE) {
        return true;
    }
    message.to_ascii_lowercase().contains("duplicate key value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_by_code() {
        assert!(is_unique_violation(Some("23505"), "insert failed"));
        assert!(!is_unique_violation(Some("23502"), "null value in column"));
        assert!(!is_unique_violation(None, "connection reset"));
    }

    #[test]
    fn test_unique_violation_by_message_fallback() {
        assert!(is_unique_violation(
            None,
            "duplicate key value violates unique constraint \"waitlist_email_key\""
        ));
        assert!(is_unique_violation(None, "Duplicate KEY value found"));
        assert!(!is_unique_violation(None, "permission denied for table"));
    }
}

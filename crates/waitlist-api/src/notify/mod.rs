//! Welcome email dispatch.

mod resend;

pub use resend::ResendNotifier;

use crate::registrar::SignupRecord;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Notifier error types.
///
/// These never cross the API boundary; the registrar logs and discards them.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The delivery provider rejected or failed the send
    #[error("Email delivery failed: {0}")]
    Api(String),
}

/// Fire-and-forget transactional email dispatch.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a welcome message to the record's email.
    async fn send_welcome(&self, record: &SignupRecord) -> Result<(), NotifyError>;
}

/// Notifier used when email dispatch is disabled in config.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_welcome(&self, record: &SignupRecord) -> Result<(), NotifyError> {
        debug!(email = %record.email, "Email dispatch disabled, skipping welcome");
        Ok(())
    }
}

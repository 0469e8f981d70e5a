//! Waitlist API - duplicate-safe signup registration service.
//!
//! This service accepts waitlist signups over HTTP to:
//! - De-duplicate signups against a uniquely-keyed record store
//! - Persist fresh signups exactly once, even under concurrent requests
//! - Dispatch a best-effort welcome email for each fresh signup

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod registrar;
pub mod store;

pub use config::Config;
pub use error::RegistrarError;
pub use notify::{NoopNotifier, Notifier, NotifyError, ResendNotifier};
pub use registrar::{Candidate, Outcome, Registrar, SignupRecord};
pub use store::{MemoryStore, RecordStore, RestStore, StoreError};

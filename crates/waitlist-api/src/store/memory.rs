//! In-memory record store.

use super::{RecordStore, StoreError};
use crate::registrar::SignupRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store keyed by email.
///
/// Check-and-insert happens under a single write lock, so the uniqueness
/// guarantee holds under concurrent callers just like a database constraint.
/// Used in tests and when persistence is disabled.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, SignupRecord>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.email) {
            return Err(StoreError::Conflict(record.email.clone()));
        }
        records.insert(record.email.clone(), record.clone());
        Ok(())
    }
}

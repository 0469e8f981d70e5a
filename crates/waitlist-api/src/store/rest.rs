//! REST record store adapter (PostgREST-style API).

use super::{is_unique_violation, RecordStore, StoreError};
use crate::registrar::SignupRecord;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Error payload returned by the store on a failed request.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Record store backed by a hosted PostgREST-style API.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStore {
    /// Create a new REST store client.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: table.into(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Extract a conflict signal out of a failed insert response.
    fn classify_failure(status: reqwest::StatusCode, body: &str) -> StoreError {
        let parsed: StoreErrorBody = serde_json::from_str(body).unwrap_or(StoreErrorBody {
            code: None,
            message: None,
        });
        let message = parsed.message.unwrap_or_else(|| body.to_string());

        if is_unique_violation(parsed.code.as_deref(), &message) {
            return StoreError::Conflict(message);
        }

        StoreError::Rejected(format!("{} - {}", status, message))
    }
}

#[async_trait]
impl RecordStore for RestStore {
    /// Check if the store API answers at all.
    async fn health_check(&self) -> bool {
        self.client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "email"), ("limit", "1")])
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<SignupRecord>, StoreError> {
        let filter = format!("eq.{}", email);
        let response = self
            .client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*"), ("email", filter.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Store lookup failed");
            return Err(StoreError::Unavailable(format!("{} - {}", status, body)));
        }

        let mut rows: Vec<SignupRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Rejected(format!("Failed to parse lookup response: {}", e)))?;

        debug!(found = !rows.is_empty(), "Store lookup completed");
        Ok(rows.pop())
    }

    #[instrument(skip(self, record), fields(email = %record.email))]
    async fn insert(&self, record: &SignupRecord) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Store insert failed");
            return Err(Self::classify_failure(status, &body));
        }

        debug!("Store insert completed");
        Ok(())
    }
}

//! Resend transactional email client.

use super::{Notifier, NotifyError};
use crate::registrar::SignupRecord;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Welcome email sender backed by the Resend HTTP API.
#[derive(Clone)]
pub struct ResendNotifier {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
    subject: String,
}

impl ResendNotifier {
    /// Create a new notifier.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        subject: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| NotifyError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            from: from.into(),
            subject: subject.into(),
        })
    }

    /// Render the welcome message body, personalized with whichever
    /// optional fields the signup carried.
    fn render_welcome(record: &SignupRecord) -> String {
        let greeting = match record.name.as_deref() {
            Some(name) => format!("Hey {},", name),
            None => "Hey there,".to_string(),
        };

        let mut body = format!(
            "<p>{}</p>\
             <p>You're officially on the waitlist.</p>",
            greeting
        );

        if let Some(occupation) = record.occupation.as_deref() {
            body.push_str(&format!(
                "<p>Great to have another {} on board.</p>",
                occupation
            ));
        }

        if let Some(portfolio) = record.portfolio.as_deref() {
            body.push_str(&format!(
                "<p>We'll be sure to check out <a href=\"{}\">your work</a>.</p>",
                portfolio
            ));
        }

        body.push_str(
            "<p>Stay tuned, we'll be in touch soon.</p>\
             <p>- The Team</p>",
        );
        body
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    #[instrument(skip(self, record), fields(email = %record.email))]
    async fn send_welcome(&self, record: &SignupRecord) -> Result<(), NotifyError> {
        let request = SendEmailRequest {
            from: &self.from,
            to: [record.email.as_str()],
            subject: &self.subject,
            html: Self::render_welcome(record),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::Api(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Welcome email send failed");
            return Err(NotifyError::Api(format!("{} - {}", status, body)));
        }

        debug!("Welcome email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(email: &str, name: Option<&str>) -> SignupRecord {
        SignupRecord {
            email: email.into(),
            name: name.map(String::from),
            occupation: None,
            portfolio: None,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_welcome_personalization() {
        let body = ResendNotifier::render_welcome(&record("a@x.com", Some("Bo")));
        assert!(body.contains("Hey Bo,"));

        let body = ResendNotifier::render_welcome(&record("a@x.com", None));
        assert!(body.contains("Hey there,"));
        assert!(!body.contains("on board"));
        assert!(!body.contains("your work"));
    }

    #[test]
    fn test_render_welcome_optional_fields() {
        let mut full = record("a@x.com", Some("Bo"));
        full.occupation = Some("editor".into());
        full.portfolio = Some("https://bo.example".into());

        let body = ResendNotifier::render_welcome(&full);
        assert!(body.contains("another editor on board"));
        assert!(body.contains("href=\"https://bo.example\""));
    }

    #[tokio::test]
    async fn test_send_welcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "to": ["a@x.com"],
                "subject": "Welcome"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "email-id"
            })))
            .mount(&server)
            .await;

        let notifier =
            ResendNotifier::new(server.uri(), "test-key", "Team <t@example.com>", "Welcome")
                .unwrap();
        notifier.send_welcome(&record("a@x.com", None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_welcome_provider_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "Invalid from address"
            })))
            .mount(&server)
            .await;

        let notifier =
            ResendNotifier::new(server.uri(), "test-key", "bad-from", "Welcome").unwrap();
        let result = notifier.send_welcome(&record("a@x.com", None)).await;
        assert!(matches!(result, Err(NotifyError::Api(_))));
    }
}

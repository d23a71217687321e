//! Partnership notifiers
//!
//! A chat webhook when one is configured, otherwise the request is only logged.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::entities::PartnershipRequest;
use crate::domain::ports::PartnershipNotifier;
use crate::error::DomainError;

/// Posts `{"text": ...}` to an incoming-webhook URL (Slack, Discord, Mattermost)
pub struct WebhookPartnershipNotifier {
    http: Client,
    webhook_url: String,
}

impl WebhookPartnershipNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            http: Client::new(),
            webhook_url,
        }
    }
}

#[async_trait]
impl PartnershipNotifier for WebhookPartnershipNotifier {
    async fn notify(&self, request: &PartnershipRequest) -> Result<(), DomainError> {
        let body = serde_json::json!({ "text": request.to_text() });

        self.http
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| DomainError::Internal(format!("Partnership webhook failed: {}", e)))?;

        tracing::info!(email = %request.email, "Partnership request forwarded");
        Ok(())
    }
}

/// Used when no webhook is configured
pub struct LogPartnershipNotifier;

#[async_trait]
impl PartnershipNotifier for LogPartnershipNotifier {
    async fn notify(&self, request: &PartnershipRequest) -> Result<(), DomainError> {
        tracing::info!(
            first_name = %request.first_name,
            last_name = %request.last_name,
            email = %request.email,
            message = %request.message,
            "Partnership request received"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let request = PartnershipRequest {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: "ana@example.com".to_string(),
            message: "Hello".to_string(),
        };
        tokio_test::assert_ok!(LogPartnershipNotifier.notify(&request).await);
    }

    #[tokio::test]
    async fn unreachable_webhook_is_an_internal_error() {
        let notifier = WebhookPartnershipNotifier::new("http://127.0.0.1:9/hook".to_string());
        let request = PartnershipRequest {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: "ana@example.com".to_string(),
            message: "Hello".to_string(),
        };

        let result = notifier.notify(&request).await;
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}

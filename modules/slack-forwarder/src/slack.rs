use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::error::{ForwardError, Result};

/// Destination for formatted alert text.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn post_text(&self, text: &str) -> Result<()>;
}

/// Slack incoming webhook.
pub struct SlackWebhook {
    webhook_url: String,
    http: reqwest::Client,
}

impl SlackWebhook {
    pub fn new(webhook_url: String) -> Self {
        Self {
            webhook_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AlertSink for SlackWebhook {
    /// Slack answers a successful post with the literal body `ok`; anything
    /// else is treated as a failure.
    async fn post_text(&self, text: &str) -> Result<()> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() || body.trim() != "ok" {
            warn!(status = %status, body = %body, "Slack webhook rejected message");
            return Err(ForwardError::Webhook {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

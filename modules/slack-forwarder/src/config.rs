use std::env;

use crate::error::{ForwardError, Result};

/// Forwarder settings, injected by the CloudFormation stack as environment variables.
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    pub webhook_url: String,
    /// Prepended to every alert, e.g. a human-friendly account name.
    pub message_prefix: Option<String>,
}

impl ForwarderConfig {
    pub fn from_env() -> Result<Self> {
        let webhook_url = env::var("WEBHOOK_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ForwardError::Config("WEBHOOK_URL environment variable must be defined".to_string())
            })?;

        Ok(Self {
            webhook_url,
            message_prefix: env::var("MESSAGE_PREFIX").ok().filter(|v| !v.is_empty()),
        })
    }

    pub fn log_redacted(&self) {
        tracing::info!(
            webhook_url = "[REDACTED]",
            message_prefix = self.message_prefix.as_deref().unwrap_or(""),
            "Forwarder config"
        );
    }
}

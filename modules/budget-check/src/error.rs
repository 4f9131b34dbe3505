use thiserror::Error;

use crate::threshold::Dimension;

pub type Result<T> = std::result::Result<T, CheckError>;

/// Failure talking to the billing or identity service.
///
/// Never interpreted by the checker; it is handed back to the caller as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to run command: {0}")]
    Command(String),

    #[error("Service error (exit status {status}): {message}")]
    Service { status: i32, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Command(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    /// A threshold percentage was not strictly positive.
    #[error("{}_threshold_percentage should be >0 (got {value})", .dimension.as_str())]
    InvalidPercentage { dimension: Dimension, value: f64 },

    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

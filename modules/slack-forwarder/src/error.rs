use thiserror::Error;

pub type Result<T> = std::result::Result<T, ForwardError>;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Slack webhook error (status {status}): {body}")]
    Webhook { status: u16, body: String },

    #[error("Runtime API error (status {status}): {message}")]
    Runtime { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        ForwardError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ForwardError {
    fn from(err: serde_json::Error) -> Self {
        ForwardError::Parse(err.to_string())
    }
}

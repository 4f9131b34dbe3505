pub mod config;
pub mod error;
pub mod event;
pub mod forwarder;
pub mod runtime;
pub mod slack;

pub use config::ForwarderConfig;
pub use error::{ForwardError, Result};
pub use event::SnsEvent;
pub use forwarder::{format_alert, AlertForwarder};
pub use runtime::LambdaRuntime;
pub use slack::{AlertSink, SlackWebhook};

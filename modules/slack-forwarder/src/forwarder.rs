use futures::future::try_join_all;
use tracing::info;

use crate::error::Result;
use crate::event::SnsEvent;
use crate::slack::AlertSink;

const MESSAGE_SUFFIX: &str = "Please set the alert thresholds to higher values if you want to be notified of overspend again this month";

/// Build the Slack text for one budget notification.
///
/// `<!here>` pings everyone active in the channel.
pub fn format_alert(prefix: Option<&str>, message: &str) -> String {
    let prefix = match prefix {
        Some(p) if !p.is_empty() => format!("{p}\n"),
        _ => String::new(),
    };
    format!("<!here> {prefix}{message}\n\n{MESSAGE_SUFFIX}")
}

/// Forwards every record of an SNS event to a sink.
pub struct AlertForwarder {
    sink: Box<dyn AlertSink>,
    message_prefix: Option<String>,
}

impl AlertForwarder {
    pub fn new(sink: Box<dyn AlertSink>, message_prefix: Option<String>) -> Self {
        Self {
            sink,
            message_prefix,
        }
    }

    /// Post all records concurrently. The first failure fails the whole event,
    /// so the invocation is reported as an error and SNS retries it.
    pub async fn handle(&self, event: &SnsEvent) -> Result<usize> {
        info!(records = event.records.len(), "SNS event received");

        let posts = event.records.iter().map(|record| {
            let text = format_alert(self.message_prefix.as_deref(), &record.sns.message);
            async move { self.sink.post_text(&text).await }
        });
        try_join_all(posts).await?;

        Ok(event.records.len())
    }
}

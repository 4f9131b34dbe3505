use serde::{Deserialize, Serialize};

/// SNS event delivered to a Lambda function. Fields other than the message are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsMessage {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl SnsEvent {
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: messages
                .into_iter()
                .map(|m| SnsRecord {
                    sns: SnsMessage {
                        message: m.into(),
                        subject: None,
                    },
                })
                .collect(),
        }
    }
}

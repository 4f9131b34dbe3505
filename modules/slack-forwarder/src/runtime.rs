//! Minimal client for the AWS Lambda Runtime API, used by custom runtimes
//! (`provided.al2023`) to pull invocations and report their outcome.

use serde_json::json;
use tracing::{error, info};

use crate::error::{ForwardError, Result};
use crate::event::SnsEvent;
use crate::forwarder::AlertForwarder;

const API_VERSION: &str = "2018-06-01";
const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";
const ERROR_TYPE_HEADER: &str = "Lambda-Runtime-Function-Error-Type";

#[derive(Debug, Clone)]
pub struct Invocation {
    pub request_id: String,
    pub payload: Vec<u8>,
}

pub struct LambdaRuntime {
    base_url: String,
    http: reqwest::Client,
}

impl LambdaRuntime {
    /// `api` is the `host:port` from `AWS_LAMBDA_RUNTIME_API`.
    pub fn new(api: &str) -> Self {
        Self::with_base_url(format!("http://{api}/{API_VERSION}/runtime"))
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api = std::env::var("AWS_LAMBDA_RUNTIME_API").map_err(|_| {
            ForwardError::Config(
                "AWS_LAMBDA_RUNTIME_API is not set; not running in Lambda".to_string(),
            )
        })?;
        Ok(Self::new(&api))
    }

    /// Block until the next invocation is available.
    pub async fn next_invocation(&self) -> Result<Invocation> {
        let url = format!("{}/invocation/next", self.base_url);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ForwardError::Runtime {
                status: status.as_u16(),
                message: body,
            });
        }

        let request_id = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ForwardError::Parse(format!("missing {REQUEST_ID_HEADER} header")))?;
        let payload = resp.bytes().await?.to_vec();

        Ok(Invocation {
            request_id,
            payload,
        })
    }

    pub async fn respond(&self, request_id: &str, body: &serde_json::Value) -> Result<()> {
        let url = format!("{}/invocation/{request_id}/response", self.base_url);
        let resp = self.http.post(&url).json(body).send().await?;
        check_accepted(resp).await
    }

    pub async fn respond_error(&self, request_id: &str, err: &ForwardError) -> Result<()> {
        let url = format!("{}/invocation/{request_id}/error", self.base_url);
        self.post_error(&url, err).await
    }

    /// Report a failure that happened before the first invocation.
    pub async fn init_error(&self, err: &ForwardError) -> Result<()> {
        let url = format!("{}/init/error", self.base_url);
        self.post_error(&url, err).await
    }

    async fn post_error(&self, url: &str, err: &ForwardError) -> Result<()> {
        let resp = self
            .http
            .post(url)
            .header(ERROR_TYPE_HEADER, "Unhandled")
            .json(&json!({
                "errorMessage": err.to_string(),
                "errorType": error_type(err),
            }))
            .send()
            .await?;
        check_accepted(resp).await
    }

    /// Pull one invocation, forward it, report the result.
    ///
    /// A failed forward is reported to Lambda and is not an error here; only
    /// failures talking to the Runtime API are.
    pub async fn handle_next(&self, forwarder: &AlertForwarder) -> Result<()> {
        let invocation = self.next_invocation().await?;
        let request_id = invocation.request_id.as_str();

        let outcome = match serde_json::from_slice::<SnsEvent>(&invocation.payload) {
            Ok(event) => forwarder.handle(&event).await,
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(count) => {
                info!(request_id, records = count, "Alerts forwarded");
                self.respond(request_id, &json!({})).await
            }
            Err(e) => {
                error!(request_id, error = %e, "Failed to forward alerts");
                self.respond_error(request_id, &e).await
            }
        }
    }

    pub async fn run(&self, forwarder: &AlertForwarder) -> Result<()> {
        loop {
            self.handle_next(forwarder).await?;
        }
    }
}

fn error_type(err: &ForwardError) -> &'static str {
    match err {
        ForwardError::Network(_) => "NetworkError",
        ForwardError::Webhook { .. } => "WebhookError",
        ForwardError::Runtime { .. } => "RuntimeError",
        ForwardError::Parse(_) => "ParseError",
        ForwardError::Config(_) => "ConfigError",
    }
}

async fn check_accepted(resp: reqwest::Response) -> Result<()> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ForwardError::Runtime {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(())
}

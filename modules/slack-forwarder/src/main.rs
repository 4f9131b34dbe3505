use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use slack_forwarder::{AlertForwarder, ForwarderConfig, LambdaRuntime, SlackWebhook};

#[tokio::main]
async fn main() -> Result<()> {
    // JSON lines for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let runtime = LambdaRuntime::from_env()?;

    let config = match ForwarderConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            runtime.init_error(&e).await?;
            return Err(e.into());
        }
    };
    config.log_redacted();

    let forwarder = AlertForwarder::new(
        Box::new(SlackWebhook::new(config.webhook_url)),
        config.message_prefix,
    );

    info!("Slack forwarder ready, waiting for invocations");
    runtime.run(&forwarder).await?;
    Ok(())
}

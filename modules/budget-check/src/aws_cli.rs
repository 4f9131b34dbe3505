use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::config::CheckConfig;
use crate::error::ProviderError;
use crate::provider::{AccountIdentity, BudgetInfoProvider};
use crate::types::DescribeBudgetResponse;

/// Talks to AWS through the `aws` command-line tool.
///
/// Credentials, profiles and regions are resolved by the tool itself, so this
/// works anywhere `aws budgets describe-budget` does.
pub struct AwsCli {
    config: CheckConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CallerIdentity {
    account: String,
}

impl AwsCli {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.config.aws_cli_bin);
        cmd.args(args).args(["--output", "json"]);
        if let Some(profile) = &self.config.aws_profile {
            cmd.args(["--profile", profile]);
        }
        if let Some(region) = &self.config.aws_region {
            cmd.args(["--region", region]);
        }
        cmd
    }

    async fn run_json<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, ProviderError> {
        debug!(bin = self.config.aws_cli_bin.as_str(), ?args, "Running aws CLI");
        let output = self.command(args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ProviderError::Service {
                status: output.status.code().unwrap_or(-1),
                message: stderr,
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait]
impl AccountIdentity for AwsCli {
    async fn caller_account_id(&self) -> Result<String, ProviderError> {
        let identity: CallerIdentity = self.run_json(&["sts", "get-caller-identity"]).await?;
        Ok(identity.account)
    }
}

#[async_trait]
impl BudgetInfoProvider for AwsCli {
    async fn describe_budget(
        &self,
        account_id: &str,
        budget_name: &str,
    ) -> Result<DescribeBudgetResponse, ProviderError> {
        self.run_json(&[
            "budgets",
            "describe-budget",
            "--account-id",
            account_id,
            "--budget-name",
            budget_name,
        ])
        .await
    }
}

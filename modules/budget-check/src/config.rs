use std::env;

/// Settings for talking to AWS, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Path or name of the `aws` executable.
    pub aws_cli_bin: String,
    pub aws_profile: Option<String>,
    pub aws_region: Option<String>,
}

impl CheckConfig {
    pub fn from_env() -> Self {
        Self {
            aws_cli_bin: env::var("AWS_CLI_BIN").unwrap_or_else(|_| "aws".to_string()),
            aws_profile: optional_env("AWS_PROFILE"),
            aws_region: optional_env("AWS_REGION"),
        }
    }

    /// Log config without echoing anything the user did not set.
    pub fn log(&self) {
        tracing::debug!(
            aws_cli_bin = self.aws_cli_bin.as_str(),
            aws_profile = self.aws_profile.as_deref().unwrap_or("(default)"),
            aws_region = self.aws_region.as_deref().unwrap_or("(default)"),
            "AWS CLI config"
        );
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            aws_cli_bin: "aws".to_string(),
            aws_profile: None,
            aws_region: None,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use budget_check::{
    exit, AwsCli, CheckConfig, CheckError, ThresholdCheckResult, ThresholdChecker, ThresholdPair,
};

/// Checks the values of the budget thresholds against the current and forecasted values.
///
/// The checks fail if the thresholds are too low and would never cause an alert
/// in the current period.
#[derive(Parser)]
#[command(name = "aws-budget-check-params")]
struct Cli {
    /// The monthly budget for all AWS costs for the account
    #[arg(value_name = "BUDGET_NAME")]
    budget_name: String,

    /// Percentage of the budget that should trigger alerts for actual costs
    #[arg(value_name = "ACTUAL_THRESHOLD_PERCENTAGE", allow_negative_numbers = true)]
    actual_threshold_percentage: f64,

    /// Percentage of the budget that should trigger alerts for forecasted costs
    #[arg(value_name = "FORECASTED_THRESHOLD_PERCENTAGE", allow_negative_numbers = true)]
    forecasted_threshold_percentage: f64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            return Ok(ExitCode::from(usage_code(&e)));
        }
    };

    // stdout is reserved for the invalid-percentage message
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CheckConfig::from_env();
    config.log();

    let outcome = run(&cli, Arc::new(AwsCli::new(config))).await;
    match &outcome {
        Ok(result) => info!(passed = result.passed, "threshold check passed: {}", result.passed),
        Err(CheckError::InvalidPercentage { .. }) => {}
        Err(e) => error!(error = %e, budget = cli.budget_name.as_str(), "Threshold check aborted"),
    }
    if let Some(message) = stdout_message(&outcome) {
        println!("{message}");
    }

    Ok(ExitCode::from(exit::for_outcome(&outcome)))
}

/// `--help` and `--version` also arrive as errors; they print to stdout and succeed.
fn usage_code(e: &clap::Error) -> u8 {
    if e.use_stderr() {
        exit::USAGE
    } else {
        exit::PASS
    }
}

/// Only an invalid percentage is reported on stdout; everything else goes to the log.
fn stdout_message(outcome: &budget_check::Result<ThresholdCheckResult>) -> Option<String> {
    match outcome {
        Err(e @ CheckError::InvalidPercentage { .. }) => Some(e.to_string()),
        _ => None,
    }
}

async fn run(cli: &Cli, aws: Arc<AwsCli>) -> budget_check::Result<ThresholdCheckResult> {
    // Reject bad percentages before touching AWS at all
    let thresholds = ThresholdPair::new(
        cli.actual_threshold_percentage,
        cli.forecasted_threshold_percentage,
    )?;

    let checker = ThresholdChecker::new(aws.as_ref(), aws.clone(), &cli.budget_name).await?;
    checker.check(&thresholds).await
}

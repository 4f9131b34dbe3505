pub mod aws_cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod provider;
pub mod threshold;
pub mod types;

pub use aws_cli::AwsCli;
pub use config::CheckConfig;
pub use error::{CheckError, ProviderError, Result};
pub use provider::{AccountIdentity, BudgetInfoProvider};
pub use threshold::{
    evaluate, trigger_amount, Dimension, ThresholdCheckResult, ThresholdChecker, ThresholdPair,
    ThresholdWarning,
};
pub use types::{BudgetSnapshot, DescribeBudgetResponse};

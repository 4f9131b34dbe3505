use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::DescribeBudgetResponse;

/// Resolves the AWS account the caller is authenticated as.
#[async_trait]
pub trait AccountIdentity: Send + Sync {
    async fn caller_account_id(&self) -> Result<String, ProviderError>;
}

/// Source of budget figures (limit plus calculated spend).
#[async_trait]
pub trait BudgetInfoProvider: Send + Sync {
    async fn describe_budget(
        &self,
        account_id: &str,
        budget_name: &str,
    ) -> Result<DescribeBudgetResponse, ProviderError>;
}

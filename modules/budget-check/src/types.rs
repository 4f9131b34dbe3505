use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// `describe-budget` response as returned by the AWS Budgets service.
///
/// Only the fields the threshold check reads are modelled; everything else
/// in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeBudgetResponse {
    pub budget: BudgetDescription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BudgetDescription {
    pub budget_name: String,
    pub budget_limit: Option<Spend>,
    pub time_unit: String,
    pub calculated_spend: Option<CalculatedSpend>,
    #[serde(default)]
    pub budget_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalculatedSpend {
    pub actual_spend: Spend,
    pub forecasted_spend: Option<Spend>,
}

/// A monetary amount. The service encodes the amount as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Spend {
    pub amount: String,
    pub unit: String,
}

impl Spend {
    pub fn new(amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            unit: unit.into(),
        }
    }

    fn parse_amount(&self, field: &str) -> Result<f64, ProviderError> {
        self.amount.trim().parse::<f64>().map_err(|e| {
            ProviderError::Parse(format!("{field} amount {:?} is not a number: {e}", self.amount))
        })
    }
}

/// The three figures a threshold check compares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSnapshot {
    pub limit_amount: f64,
    pub actual_spend: f64,
    pub forecasted_spend: f64,
}

impl BudgetSnapshot {
    pub fn new(limit_amount: f64, actual_spend: f64, forecasted_spend: f64) -> Self {
        Self {
            limit_amount,
            actual_spend,
            forecasted_spend,
        }
    }

    /// Extract the snapshot from a service response.
    ///
    /// Missing or non-numeric amounts surface as [`ProviderError::Parse`].
    pub fn from_response(resp: &DescribeBudgetResponse) -> Result<Self, ProviderError> {
        let budget = &resp.budget;
        let limit = budget
            .budget_limit
            .as_ref()
            .ok_or_else(|| ProviderError::Parse("budget has no BudgetLimit".to_string()))?;
        let calculated = budget
            .calculated_spend
            .as_ref()
            .ok_or_else(|| ProviderError::Parse("budget has no CalculatedSpend".to_string()))?;
        let forecasted = calculated
            .forecasted_spend
            .as_ref()
            .ok_or_else(|| ProviderError::Parse("budget has no ForecastedSpend".to_string()))?;

        Ok(Self {
            limit_amount: limit.parse_amount("BudgetLimit")?,
            actual_spend: calculated.actual_spend.parse_amount("ActualSpend")?,
            forecasted_spend: forecasted.parse_amount("ForecastedSpend")?,
        })
    }
}

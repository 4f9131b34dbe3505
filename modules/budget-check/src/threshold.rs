use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CheckError, Result};
use crate::provider::{AccountIdentity, BudgetInfoProvider};
use crate::types::BudgetSnapshot;

/// Which kind of budget alert a threshold drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Actual,
    Forecasted,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Forecasted => "forecasted",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actual and forecasted alert thresholds, both as a percentage of the budget limit.
///
/// Only constructible with finite, strictly positive values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPair {
    actual: f64,
    forecasted: f64,
}

impl ThresholdPair {
    /// Validate the actual percentage first; the forecasted one is only looked
    /// at once the actual one passed, so a double failure reports `Actual`.
    pub fn new(actual: f64, forecasted: f64) -> Result<Self> {
        let actual = positive_percentage(Dimension::Actual, actual)?;
        let forecasted = positive_percentage(Dimension::Forecasted, forecasted)?;
        Ok(Self { actual, forecasted })
    }

    pub fn actual(&self) -> f64 {
        self.actual
    }

    pub fn forecasted(&self) -> f64 {
        self.forecasted
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Actual => self.actual,
            Dimension::Forecasted => self.forecasted,
        }
    }
}

fn positive_percentage(dimension: Dimension, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CheckError::InvalidPercentage { dimension, value })
    }
}

/// A threshold whose alert cannot fire this period: spend already exceeds the trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdWarning {
    pub dimension: Dimension,
    pub trigger: f64,
    pub spend: f64,
}

impl fmt::Display for ThresholdWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{dim} threshold trigger ({}) < calculated {dim} spend ({})",
            self.trigger,
            self.spend,
            dim = self.dimension,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdCheckResult {
    pub passed: bool,
    pub warnings: Vec<ThresholdWarning>,
}

impl ThresholdCheckResult {
    pub fn warning_for(&self, dimension: Dimension) -> Option<&ThresholdWarning> {
        self.warnings.iter().find(|w| w.dimension == dimension)
    }
}

/// Monetary amount at which a percentage threshold triggers.
pub fn trigger_amount(percentage: f64, limit_amount: f64) -> f64 {
    percentage / 100.0 * limit_amount
}

/// Compare both trigger amounts against the spend figures.
///
/// Both dimensions are always evaluated, actual first, and each failing one
/// yields exactly one warning. A comparison involving NaN counts as failing.
pub fn evaluate(snapshot: &BudgetSnapshot, thresholds: &ThresholdPair) -> ThresholdCheckResult {
    let dimensions = [
        (Dimension::Actual, snapshot.actual_spend),
        (Dimension::Forecasted, snapshot.forecasted_spend),
    ];

    let mut warnings = Vec::new();
    for (dimension, spend) in dimensions {
        let trigger = trigger_amount(thresholds.get(dimension), snapshot.limit_amount);
        let ok = trigger >= spend;
        if !ok {
            let warning = ThresholdWarning {
                dimension,
                trigger,
                spend,
            };
            warn!(
                dimension = dimension.as_str(),
                trigger,
                spend,
                "warning: {warning}"
            );
            warnings.push(warning);
        }
    }

    ThresholdCheckResult {
        passed: warnings.is_empty(),
        warnings,
    }
}

/// Checks the thresholds configured for one AWS Budget.
pub struct ThresholdChecker {
    budgets: Arc<dyn BudgetInfoProvider>,
    account_id: String,
    budget_name: String,
}

impl ThresholdChecker {
    /// Resolve the caller's account once and bind the checker to `budget_name`.
    pub async fn new(
        identity: &dyn AccountIdentity,
        budgets: Arc<dyn BudgetInfoProvider>,
        budget_name: impl Into<String>,
    ) -> Result<Self> {
        let account_id = identity.caller_account_id().await?;
        debug!(account_id = account_id.as_str(), "Resolved caller account");
        Ok(Self::with_account(budgets, account_id, budget_name))
    }

    pub fn with_account(
        budgets: Arc<dyn BudgetInfoProvider>,
        account_id: impl Into<String>,
        budget_name: impl Into<String>,
    ) -> Self {
        Self {
            budgets,
            account_id: account_id.into(),
            budget_name: budget_name.into(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn budget_name(&self) -> &str {
        &self.budget_name
    }

    /// Query the billing service once for the current figures.
    pub async fn fetch_snapshot(&self) -> Result<BudgetSnapshot> {
        let resp = self
            .budgets
            .describe_budget(&self.account_id, &self.budget_name)
            .await?;
        debug!(?resp, "describe-budget response");

        let snapshot = BudgetSnapshot::from_response(&resp)?;
        info!(limit_amount = snapshot.limit_amount, "budget amount");
        info!(time_unit = resp.budget.time_unit.as_str(), "time limit");
        info!(actual_spend = snapshot.actual_spend, "calculated actual spend");
        info!(
            forecasted_spend = snapshot.forecasted_spend,
            "calculated forecasted spend"
        );
        Ok(snapshot)
    }

    /// Check whether both thresholds are high enough to trigger an alert in
    /// the current period.
    ///
    /// Invalid percentages are rejected before the billing service is queried.
    /// Thresholds that are too low are not an error: the result carries
    /// `passed == false` and one warning per failing dimension.
    pub async fn check_threshold_trigger(
        &self,
        actual_threshold_percentage: f64,
        forecasted_threshold_percentage: f64,
    ) -> Result<ThresholdCheckResult> {
        let thresholds =
            ThresholdPair::new(actual_threshold_percentage, forecasted_threshold_percentage)?;
        self.check(&thresholds).await
    }

    /// Same as [`Self::check_threshold_trigger`] for an already validated pair.
    pub async fn check(&self, thresholds: &ThresholdPair) -> Result<ThresholdCheckResult> {
        let snapshot = self.fetch_snapshot().await?;
        Ok(evaluate(&snapshot, thresholds))
    }
}

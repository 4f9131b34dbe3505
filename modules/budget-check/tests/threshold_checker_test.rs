//! Threshold checks against stubbed identity and budget services.
//!
//! The stub records every query so tests can assert when the billing service
//! was (or was not) consulted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use budget_check::types::{BudgetDescription, CalculatedSpend, Spend};
use budget_check::{
    AccountIdentity, BudgetInfoProvider, CheckError, DescribeBudgetResponse, Dimension,
    ProviderError, ThresholdChecker,
};

const ACCOUNT_ID: &str = "123456789012";
const BUDGET_NAME: &str = "my-budget";

fn budget_response(limit: f64, actual: f64, forecasted: f64) -> DescribeBudgetResponse {
    DescribeBudgetResponse {
        budget: BudgetDescription {
            budget_name: BUDGET_NAME.to_string(),
            budget_limit: Some(Spend::new(limit.to_string(), "USD")),
            time_unit: "MONTHLY".to_string(),
            calculated_spend: Some(CalculatedSpend {
                actual_spend: Spend::new(actual.to_string(), "USD"),
                forecasted_spend: Some(Spend::new(forecasted.to_string(), "USD")),
            }),
            budget_type: Some("COST".to_string()),
        },
    }
}

struct StubIdentity {
    account: Option<&'static str>,
}

#[async_trait]
impl AccountIdentity for StubIdentity {
    async fn caller_account_id(&self) -> Result<String, ProviderError> {
        self.account.map(str::to_string).ok_or_else(|| ProviderError::Service {
            status: 255,
            message: "Unable to locate credentials".to_string(),
        })
    }
}

struct StubBudgets {
    response: Option<DescribeBudgetResponse>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl StubBudgets {
    fn returning(limit: f64, actual: f64, forecasted: f64) -> Arc<Self> {
        Arc::new(Self {
            response: Some(budget_response(limit, actual, forecasted)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn not_found() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BudgetInfoProvider for StubBudgets {
    async fn describe_budget(
        &self,
        account_id: &str,
        budget_name: &str,
    ) -> Result<DescribeBudgetResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() =
            Some((account_id.to_string(), budget_name.to_string()));
        self.response.clone().ok_or_else(|| ProviderError::Service {
            status: 254,
            message: format!("NotFoundException: Unable to get budget: {budget_name}"),
        })
    }
}

async fn checker(budgets: &Arc<StubBudgets>) -> ThresholdChecker {
    let identity = StubIdentity {
        account: Some(ACCOUNT_ID),
    };
    ThresholdChecker::new(&identity, budgets.clone(), BUDGET_NAME)
        .await
        .expect("identity resolves")
}

#[tokio::test]
async fn low_actual_threshold_returns_false() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let result = checker(&budgets)
        .await
        .check_threshold_trigger(10.0, 110.0)
        .await
        .unwrap();

    assert!(!result.passed);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warning_for(Dimension::Actual).is_some());
}

#[tokio::test]
async fn low_forecasted_threshold_returns_false() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let result = checker(&budgets)
        .await
        .check_threshold_trigger(100.0, 10.0)
        .await
        .unwrap();

    assert!(!result.passed);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warning_for(Dimension::Forecasted).is_some());
}

#[tokio::test]
async fn high_thresholds_return_true() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let result = checker(&budgets)
        .await
        .check_threshold_trigger(100.0, 110.0)
        .await
        .unwrap();

    assert!(result.passed);
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn queries_budget_with_resolved_account() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let checker = checker(&budgets).await;
    assert_eq!(checker.account_id(), ACCOUNT_ID);

    checker.check_threshold_trigger(100.0, 110.0).await.unwrap();

    assert_eq!(budgets.calls(), 1);
    let request = budgets.last_request.lock().unwrap().clone();
    assert_eq!(
        request,
        Some((ACCOUNT_ID.to_string(), BUDGET_NAME.to_string()))
    );
}

#[tokio::test]
async fn zero_actual_percentage_fails_before_query() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let err = checker(&budgets)
        .await
        .check_threshold_trigger(0.0, 110.0)
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            CheckError::InvalidPercentage { dimension: Dimension::Actual, value } if value == 0.0
        ),
        "got {err:?}"
    );
    assert_eq!(budgets.calls(), 0);
}

#[tokio::test]
async fn both_invalid_reports_actual_only() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let err = checker(&budgets)
        .await
        .check_threshold_trigger(-1.0, -2.0)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "actual_threshold_percentage should be >0 (got -1)"
    );
    assert_eq!(budgets.calls(), 0);
}

#[tokio::test]
async fn negative_forecasted_percentage_fails() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let err = checker(&budgets)
        .await
        .check_threshold_trigger(100.0, -5.0)
        .await
        .unwrap_err();

    assert!(
        matches!(err, CheckError::InvalidPercentage { dimension: Dimension::Forecasted, .. }),
        "got {err:?}"
    );
    assert_eq!(budgets.calls(), 0);
}

#[tokio::test]
async fn unknown_budget_propagates_service_error() {
    let budgets = StubBudgets::not_found();
    let err = checker(&budgets)
        .await
        .check_threshold_trigger(100.0, 110.0)
        .await
        .unwrap_err();

    match err {
        CheckError::Upstream(ProviderError::Service { status, message }) => {
            assert_eq!(status, 254);
            assert!(message.contains("NotFoundException"));
        }
        other => panic!("expected upstream service error, got {other:?}"),
    }
    assert_eq!(budgets.calls(), 1);
}

#[tokio::test]
async fn identity_failure_prevents_construction() {
    let budgets = StubBudgets::returning(100.0, 90.0, 100.0);
    let identity = StubIdentity { account: None };

    let result = ThresholdChecker::new(&identity, budgets.clone(), BUDGET_NAME).await;
    assert!(matches!(result, Err(CheckError::Upstream(_))));
    assert_eq!(budgets.calls(), 0);
}

#[tokio::test]
async fn repeated_checks_refetch_and_agree() {
    let budgets = StubBudgets::returning(250.0, 120.0, 260.0);
    let checker = checker(&budgets).await;

    let first = checker.check_threshold_trigger(80.0, 100.0).await.unwrap();
    let second = checker.check_threshold_trigger(80.0, 100.0).await.unwrap();

    assert_eq!(first, second);
    assert!(!first.passed);
    assert!(first.warning_for(Dimension::Forecasted).is_some());
    assert_eq!(budgets.calls(), 2);
}

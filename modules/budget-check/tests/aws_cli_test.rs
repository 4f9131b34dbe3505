//! `AwsCli` against a fake `aws` executable.
//!
//! Everything runs in one test so no other test forks while a script is
//! being written.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use budget_check::{AccountIdentity, AwsCli, BudgetInfoProvider, CheckConfig, ProviderError};

const FAKE_AWS: &str = r#"#!/bin/sh
case "$1" in
  sts)
    echo '{"UserId": "AIDEXAMPLE", "Account": "123456789012", "Arn": "arn:aws:iam::123456789012:user/dev"}'
    ;;
  budgets)
    if [ "$6" != "my-budget" ]; then
      echo "An error occurred (NotFoundException) when calling the DescribeBudget operation" >&2
      exit 254
    fi
    cat <<JSON
{"Budget": {"BudgetName": "my-budget",
  "BudgetLimit": {"Amount": "100.0", "Unit": "USD"},
  "TimeUnit": "MONTHLY",
  "CalculatedSpend": {"ActualSpend": {"Amount": "90.0", "Unit": "USD"},
                      "ForecastedSpend": {"Amount": "100.0", "Unit": "USD"}},
  "BudgetType": "COST"}}
JSON
    ;;
esac
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path.display().to_string()
}

fn cli(bin: String) -> AwsCli {
    AwsCli::new(CheckConfig {
        aws_cli_bin: bin,
        ..CheckConfig::default()
    })
}

#[tokio::test]
async fn aws_cli_provider() {
    let dir = tempfile::tempdir().expect("tempdir");
    let aws = cli(write_script(dir.path(), "aws", FAKE_AWS));

    // identity
    let account = aws.caller_account_id().await.expect("account id");
    assert_eq!(account, "123456789012");

    // budget found
    let resp = aws
        .describe_budget(&account, "my-budget")
        .await
        .expect("budget");
    assert_eq!(resp.budget.budget_name, "my-budget");
    assert_eq!(resp.budget.time_unit, "MONTHLY");

    // budget missing: non-zero exit surfaces stderr
    let err = aws
        .describe_budget(&account, "budget-that-does-not-exist")
        .await
        .unwrap_err();
    match err {
        ProviderError::Service { status, message } => {
            assert_eq!(status, 254);
            assert!(message.contains("NotFoundException"), "got {message}");
        }
        other => panic!("expected service error, got {other:?}"),
    }

    // garbage on stdout
    let garbage = cli(write_script(dir.path(), "aws-garbage", "#!/bin/sh\necho not-json\n"));
    let err = garbage.caller_account_id().await.unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)), "got {err:?}");

    // binary missing
    let missing = cli(dir.path().join("no-such-aws").display().to_string());
    let err = missing.caller_account_id().await.unwrap_err();
    assert!(matches!(err, ProviderError::Command(_)), "got {err:?}");
}

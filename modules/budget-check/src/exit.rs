//! Process exit codes for `aws-budget-check-params`.

use crate::error::{CheckError, Result};
use crate::threshold::ThresholdCheckResult;

pub const PASS: u8 = 0;
/// Thresholds too low to fire this period.
pub const LOW_THRESHOLDS: u8 = 1;
pub const UPSTREAM_ERROR: u8 = 3;
/// Equivalent to `exit(-2)`.
pub const INVALID_PERCENTAGE: u8 = 254;
/// Equivalent to `exit(-1)`.
pub const USAGE: u8 = 255;

pub fn for_outcome(outcome: &Result<ThresholdCheckResult>) -> u8 {
    match outcome {
        Ok(result) if result.passed => PASS,
        Ok(_) => LOW_THRESHOLDS,
        Err(CheckError::InvalidPercentage { .. }) => INVALID_PERCENTAGE,
        Err(CheckError::Upstream(_)) => UPSTREAM_ERROR,
    }
}

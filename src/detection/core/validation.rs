//! detection::core::validation — request gate for the orchestrator.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. at least three observations;
//! 2. `0 < max_fractional_anomalies <= 1`;
//! 3. `0 < sensitivity_score <= 100`;
//! 4. every value finite.
//!
//! NaN parameters fail their range check.

use crate::detection::errors::ValidationFailure;

/// Minimum dataset size the detector scores.
pub const MIN_OBSERVATIONS: usize = 3;

/// Validate one detection request.
///
/// Errors
/// ------
/// - The first [`ValidationFailure`] in the order listed in the module docs.
pub fn validate_request(
    values: &[f64], sensitivity_score: f64, max_fractional_anomalies: f64,
) -> Result<(), ValidationFailure> {
    if values.len() < MIN_OBSERVATIONS {
        return Err(ValidationFailure::TooFewPoints { found: values.len() });
    }
    if !(max_fractional_anomalies > 0.0 && max_fractional_anomalies <= 1.0) {
        return Err(ValidationFailure::InvalidMaxFraction(max_fractional_anomalies));
    }
    if !(sensitivity_score > 0.0 && sensitivity_score <= 100.0) {
        return Err(ValidationFailure::InvalidSensitivity(sensitivity_score));
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationFailure::NonFiniteValue { index, value });
    }
    Ok(())
}

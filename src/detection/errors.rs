//! detection::errors — soft rejections and normalization failures.
//!
//! Purpose
//! -------
//! Name the two failure families of the detection pipeline:
//! [`ValidationFailure`] for requests the orchestrator refuses to score, and
//! [`NormalizationError`] for Box-Cox fits that could not complete.
//!
//! Key behaviors
//! -------------
//! - `ValidationFailure`'s `Display` strings are the fixed rejection
//!   messages returned to callers verbatim in the response details.
//! - `NormalizationError` wraps the statistical and optimizer error types so
//!   the normalizer can use `?` over both layers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Neither type escapes `detect_univariate_statistical` as an `Err`; both
//!   are folded into the returned diagnostics.
//!
//! Conventions
//! -----------
//! - With the `python-bindings` feature, both convert into `PyValueError`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{optimization::errors::OptError, statistical_tests::errors::StatTestError};

/// Fixed rejection message for datasets with fewer than three points.
pub const MSG_TOO_FEW_POINTS: &str =
    "Must have a minimum of at least three data points for anomaly detection.";
/// Fixed rejection message for an out-of-range anomaly cap.
pub const MSG_INVALID_MAX_FRACTION: &str =
    "Must have a valid max fraction of anomalies, 0 < x <= 1.0.";
/// Fixed rejection message for an out-of-range sensitivity.
pub const MSG_INVALID_SENSITIVITY: &str = "Must have a valid sensitivity score, 0 < x <= 100.";
/// Fixed rejection message for NaN or infinite observation values.
pub const MSG_NON_FINITE_VALUE: &str = "Must have only finite values.";

pub type NormalizationResult<T> = Result<T, NormalizationError>;

/// ValidationFailure — reasons a request is returned unscored.
///
/// Variants
/// --------
/// - `TooFewPoints { found }`
///   Fewer than three observations.
/// - `InvalidMaxFraction(value)`
///   The anomaly cap is outside `(0, 1]` (or NaN).
/// - `InvalidSensitivity(value)`
///   The sensitivity is outside `(0, 100]` (or NaN).
/// - `NonFiniteValue { index, value }`
///   An observation value is NaN or ±∞.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    TooFewPoints { found: usize },
    InvalidMaxFraction(f64),
    InvalidSensitivity(f64),
    NonFiniteValue { index: usize, value: f64 },
}

impl ValidationFailure {
    /// The fixed message carried in the response details.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationFailure::TooFewPoints { .. } => MSG_TOO_FEW_POINTS,
            ValidationFailure::InvalidMaxFraction(_) => MSG_INVALID_MAX_FRACTION,
            ValidationFailure::InvalidSensitivity(_) => MSG_INVALID_SENSITIVITY,
            ValidationFailure::NonFiniteValue { .. } => MSG_NON_FINITE_VALUE,
        }
    }
}

impl std::error::Error for ValidationFailure {}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "python-bindings")]
impl From<ValidationFailure> for PyErr {
    fn from(err: ValidationFailure) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// NormalizationError — a Box-Cox fit or post-fit test that failed.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationError {
    Stat(StatTestError),
    Opt(OptError),
}

impl std::error::Error for NormalizationError {}

impl std::fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizationError::Stat(err) => write!(f, "{err}"),
            NormalizationError::Opt(err) => write!(f, "{err}"),
        }
    }
}

impl From<StatTestError> for NormalizationError {
    fn from(err: StatTestError) -> Self {
        NormalizationError::Stat(err)
    }
}

impl From<OptError> for NormalizationError {
    fn from(err: OptError) -> Self {
        NormalizationError::Opt(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<NormalizationError> for PyErr {
    fn from(err: NormalizationError) -> PyErr {
        PyValueError::new_err(format!("NormalizationError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The fixed rejection messages produced by `ValidationFailure`.
    // - `From` conversions and `Display` passthrough for
    //   `NormalizationError`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify each rejection renders its fixed message, independent of the
    // payload.
    //
    // Given
    // -----
    // - One value of each `ValidationFailure` variant.
    //
    // Expect
    // ------
    // - `to_string()` equals the corresponding constant.
    fn validation_failure_display_is_fixed_message() {
        // Arrange
        let cases = [
            (ValidationFailure::TooFewPoints { found: 2 }, MSG_TOO_FEW_POINTS),
            (ValidationFailure::InvalidMaxFraction(1.5), MSG_INVALID_MAX_FRACTION),
            (ValidationFailure::InvalidSensitivity(0.0), MSG_INVALID_SENSITIVITY),
            (ValidationFailure::NonFiniteValue { index: 3, value: f64::NAN }, MSG_NON_FINITE_VALUE),
        ];

        // Act / Assert
        for (failure, expected) in cases {
            assert_eq!(failure.to_string(), expected);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure lower-layer errors convert into `NormalizationError` and keep
    // their messages.
    //
    // Given
    // -----
    // - `StatTestError::ZeroVariance` and `OptError::DegenerateTransform`.
    //
    // Expect
    // ------
    // - The matching wrapper variant and an unchanged `Display` string.
    fn normalization_error_wraps_lower_layers() {
        // Arrange
        let stat = StatTestError::ZeroVariance;
        let opt = OptError::DegenerateTransform { lambda: 0.5 };

        // Act
        let from_stat: NormalizationError = stat.clone().into();
        let from_opt: NormalizationError = opt.clone().into();

        // Assert
        assert_eq!(from_stat, NormalizationError::Stat(stat.clone()));
        assert_eq!(from_stat.to_string(), stat.to_string());
        assert_eq!(from_opt.to_string(), opt.to_string());
    }
}

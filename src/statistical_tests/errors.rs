//! statistical_tests::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the descriptive
//! statistics, the normality tests, and the extended outlier tests, together
//! with a conversion layer to Python exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`StatResult`] and [`StatTestError`] as the canonical result and
//!   error types for every routine under `statistics` and
//!   `statistical_tests`.
//! - Attach human-readable `Display` messages to each variant so that the
//!   diagnostics bundle can embed them verbatim.
//! - Implement `From<StatTestError> for PyErr` to map failures into
//!   `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Routines which use this error type validate their inputs (length,
//!   finiteness, significance level) and return [`StatResult<T>`] instead of
//!   panicking.
//! - `StatTestError` values are small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of domain constraints ("need at least 3
//!   observations", "alpha must lie in (0, 1)") rather than low-level
//!   details.
//! - Optimizer failures live in `optimization::errors`; detection-level
//!   soft failures live in `detection::errors`.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type StatResult<T> = Result<T, StatTestError>;

/// StatTestError — error conditions for statistical routines.
///
/// Variants
/// --------
/// - `InsufficientData { needed, found }`
///   The routine requires at least `needed` observations.
/// - `InvalidData(value)`
///   A data element is non-finite (NaN or ±∞).
/// - `InvalidAlpha(alpha)`
///   The significance level is not in the open interval (0, 1).
/// - `ZeroVariance`
///   All observations are identical, so studentized or standardized
///   statistics are undefined.
/// - `SampleTooLarge { max, found }`
///   The routine has no approximation beyond `max` observations.
/// - `NonPositiveValue(value)`
///   A Box-Cox input is ≤ 0, outside the transform's domain.
/// - `NonFiniteStatistic(name)`
///   An intermediate statistic evaluated to NaN or ±∞.
#[derive(Debug, Clone, PartialEq)]
pub enum StatTestError {
    //------ Input validation errors ------
    InsufficientData { needed: usize, found: usize },
    InvalidData(f64),
    InvalidAlpha(f64),
    SampleTooLarge { max: usize, found: usize },
    NonPositiveValue(f64),

    //------ Numerical errors ------
    ZeroVariance,
    NonFiniteStatistic(&'static str),
}

impl std::error::Error for StatTestError {}

impl std::fmt::Display for StatTestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatTestError::InsufficientData { needed, found } => {
                write!(f, "Need at least {needed} observations, found {found}.")
            }
            StatTestError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            StatTestError::InvalidAlpha(alpha) => {
                write!(f, "Invalid alpha value: {alpha}. Must satisfy 0 < alpha < 1.")
            }
            StatTestError::SampleTooLarge { max, found } => {
                write!(f, "Sample too large: {found} observations, at most {max} supported.")
            }
            StatTestError::NonPositiveValue(value) => {
                write!(f, "Non-positive value {value}: Box-Cox requires strictly positive data.")
            }
            StatTestError::ZeroVariance => {
                write!(f, "All observations are identical; the statistic is undefined.")
            }
            StatTestError::NonFiniteStatistic(name) => {
                write!(f, "The {name} statistic evaluated to a non-finite value.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<StatTestError> for PyErr {
    fn from(err: StatTestError) -> PyErr {
        PyValueError::new_err(format!("StatTestError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` formatting for StatTestError variants.
    // - Embedding of payload values into error messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<StatTestError> for PyErr` conversion, which requires
    //   linking against the Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `InsufficientData` reports both the required and the
    // observed sample sizes.
    //
    // Given
    // -----
    // - `StatTestError::InsufficientData { needed: 8, found: 5 }`.
    //
    // Expect
    // ------
    // - The message contains "8" and "5".
    fn insufficient_data_includes_needed_and_found() {
        // Arrange
        let err = StatTestError::InsufficientData { needed: 8, found: 5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('8') && msg.contains('5'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `InvalidAlpha` includes the offending alpha.
    //
    // Given
    // -----
    // - `StatTestError::InvalidAlpha(1.5)`.
    //
    // Expect
    // ------
    // - The message contains "1.5".
    fn invalid_alpha_includes_payload_in_display() {
        // Arrange
        let err = StatTestError::InvalidAlpha(1.5);

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("1.5"), "Display message should include alpha.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure `ZeroVariance` and `NonFiniteStatistic` produce non-empty,
    // descriptive messages.
    //
    // Given
    // -----
    // - `ZeroVariance` and `NonFiniteStatistic("Shapiro-Wilk W")`.
    //
    // Expect
    // ------
    // - Both messages are non-empty; the second names the statistic.
    fn numerical_errors_have_descriptive_messages() {
        // Arrange
        let zero = StatTestError::ZeroVariance;
        let non_finite = StatTestError::NonFiniteStatistic("Shapiro-Wilk W");

        // Act
        let zero_msg = zero.to_string();
        let non_finite_msg = non_finite.to_string();

        // Assert
        assert!(!zero_msg.trim().is_empty());
        assert!(non_finite_msg.contains("Shapiro-Wilk W"), "Got: {non_finite_msg}");
    }
}

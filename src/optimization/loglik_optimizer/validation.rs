//! Validation helpers for log-likelihood optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks log-likelihood outputs
//!   for finiteness.
//! - **Likelihood data**: [`validate_positive_data`] checks that a sample
//!   lies in the Box-Cox domain before any λ is evaluated.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance (for convergence).
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Returns
/// The owned `Theta` if valid.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate that `data` holds at least `min_len` finite, strictly positive
/// observations.
///
/// # Errors
/// - [`OptError::InsufficientData`] if `data.len() < min_len`.
/// - [`OptError::NonPositiveData`] for the first element that is
///   non-finite or `<= 0.0`.
pub fn validate_positive_data(data: &[f64], min_len: usize) -> OptResult<()> {
    if data.len() < min_len {
        return Err(OptError::InsufficientData { needed: min_len, found: data.len() });
    }
    match data.iter().position(|v| !(v.is_finite() && *v > 0.0)) {
        Some(index) => Err(OptError::NonPositiveData { index, value: data[index] }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Tolerance guards (finite and strictly positive).
    // - Gradient dimension and finiteness checks.
    // - `theta_hat` presence and finiteness.
    // - The positive-data guard used by the Box-Cox likelihood.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that tolerances must be finite and strictly positive while
    // `None` is accepted.
    //
    // Given
    // -----
    // - `None`, `Some(1e-6)`, `Some(0.0)`, `Some(f64::INFINITY)`.
    //
    // Expect
    // ------
    // - The first two pass; the last two return the matching error.
    fn tolerances_must_be_finite_and_positive() {
        // Arrange / Act / Assert
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_cost(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::INFINITY)),
            Err(OptError::InvalidTolCost { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure gradient validation checks both length and finiteness.
    //
    // Given
    // -----
    // - A length-2 gradient against `dim = 1`; a gradient holding NaN.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidGradient { index: 0, .. }`.
    fn validate_grad_rejects_wrong_dim_and_non_finite() {
        // Arrange
        let wrong_dim = array![1.0, 2.0];
        let non_finite = array![f64::NAN];

        // Act / Assert
        assert_eq!(
            validate_grad(&wrong_dim, 1).unwrap_err(),
            OptError::GradientDimMismatch { expected: 1, found: 2 }
        );
        assert!(matches!(
            validate_grad(&non_finite, 1),
            Err(OptError::InvalidGradient { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `validate_theta_hat` unwraps finite estimates and rejects
    // missing or non-finite ones.
    //
    // Given
    // -----
    // - `Some([0.5])`, `None`, `Some([inf])`.
    //
    // Expect
    // ------
    // - `Ok([0.5])`, `MissingThetaHat`, `InvalidThetaHat`.
    fn validate_theta_hat_paths() {
        // Arrange / Act / Assert
        assert_eq!(validate_theta_hat(Some(array![0.5])).unwrap(), array![0.5]);
        assert_eq!(validate_theta_hat(None).unwrap_err(), OptError::MissingThetaHat);
        assert!(matches!(
            validate_theta_hat(Some(array![f64::INFINITY])),
            Err(OptError::InvalidThetaHat { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Exercise every branch of `validate_positive_data`.
    //
    // Given
    // -----
    // - A short sample, a sample containing 0, and a valid sample.
    //
    // Expect
    // ------
    // - `InsufficientData`, `NonPositiveData { index: 1, .. }`, `Ok(())`.
    fn validate_positive_data_branches() {
        // Arrange
        let short = [1.0];
        let with_zero = [1.0, 0.0, 2.0];
        let valid = [0.5, 1.0, 2.0];

        // Act / Assert
        assert_eq!(
            validate_positive_data(&short, 2).unwrap_err(),
            OptError::InsufficientData { needed: 2, found: 1 }
        );
        assert!(matches!(
            validate_positive_data(&with_zero, 2),
            Err(OptError::NonPositiveData { index: 1, .. })
        ));
        assert!(validate_positive_data(&valid, 2).is_ok());
    }
}

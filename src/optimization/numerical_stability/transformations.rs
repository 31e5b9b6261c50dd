//! Numerically guarded power transforms.
//!
//! Provides the Box-Cox transform and its profile log-likelihood in forms
//! that stay well-conditioned as λ approaches zero, where the naïve
//! `(x^λ − 1)/λ` loses every significant digit.
//!
//! # Provided items
//! - [`LAMBDA_EPS`]: |λ| below which the logarithmic limit is used.
//! - [`box_cox`]: scalar transform for `x > 0`.
//! - [`box_cox_all`]: validated vector transform.
//! - [`box_cox_profile_loglik`]: `ℓ(λ) = (λ − 1) Σ ln xᵢ − n/2 · ln σ̂²(y(λ))`.
//! - [`box_cox_dlambda`], [`box_cox_profile_score`]: the matching
//!   derivatives in λ.

use crate::statistical_tests::errors::{StatResult, StatTestError};

/// |λ| below which `box_cox` switches to `ln x`.
pub const LAMBDA_EPS: f64 = 1e-10;

/// Box-Cox transform `y(λ) = (x^λ − 1)/λ`, with `y(0) = ln x`.
///
/// For small non-zero |λ| the result is computed as `expm1(λ·ln x)/λ`,
/// which agrees with the logarithmic limit to within rounding.
///
/// # Parameters
/// - `x`: strictly positive input; callers validate the domain.
/// - `lambda`: finite transform parameter.
pub fn box_cox(x: f64, lambda: f64) -> f64 {
    let ln_x = x.ln();
    if lambda.abs() < LAMBDA_EPS { ln_x } else { (lambda * ln_x).exp_m1() / lambda }
}

/// Apply [`box_cox`] to every element of `values`.
///
/// # Errors
/// - `StatTestError::NonPositiveValue` for the first element that is not
///   strictly positive and finite.
pub fn box_cox_all(values: &[f64], lambda: f64) -> StatResult<Vec<f64>> {
    values
        .iter()
        .map(|&x| {
            if x.is_finite() && x > 0.0 {
                Ok(box_cox(x, lambda))
            } else {
                Err(StatTestError::NonPositiveValue(x))
            }
        })
        .collect()
}

/// Profile log-likelihood of the Box-Cox model at `lambda`.
///
/// `ℓ(λ) = (λ − 1)·Σ ln xᵢ − (n/2)·ln σ̂²`, where σ̂² is the population
/// variance of the transformed sample. `sum_ln` is `Σ ln xᵢ`, passed in so
/// repeated evaluations during optimization do not recompute it.
///
/// Returns `-∞` when the transformed sample is constant; callers translate
/// that into a domain error.
pub fn box_cox_profile_loglik(values: &[f64], sum_ln: f64, lambda: f64) -> f64 {
    let n = values.len() as f64;
    let y: Vec<f64> = values.iter().map(|&x| box_cox(x, lambda)).collect();
    let mean = y.iter().sum::<f64>() / n;
    let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if var.is_nan() || var <= 0.0 {
        return f64::NEG_INFINITY;
    }
    (lambda - 1.0) * sum_ln - 0.5 * n * var.ln()
}

/// |λ ln x| below which [`box_cox_dlambda`] uses its Taylor expansion.
const SERIES_EPS: f64 = 1e-4;

/// Derivative `∂y/∂λ` of the Box-Cox transform at `x > 0`.
///
/// With `u = λ ln x` this is `(u·eᵘ − (eᵘ − 1)) / λ²`; near `u = 0` the
/// expansion `ln²x · (1/2 + u/3 + u²/8)` replaces it.
pub fn box_cox_dlambda(x: f64, lambda: f64) -> f64 {
    let ln_x = x.ln();
    let u = lambda * ln_x;
    if u.abs() < SERIES_EPS {
        ln_x * ln_x * (0.5 + u / 3.0 + u * u / 8.0)
    } else {
        (u * u.exp() - u.exp_m1()) / (lambda * lambda)
    }
}

/// Derivative `dℓ/dλ` of [`box_cox_profile_loglik`].
///
/// `dℓ/dλ = Σ ln xᵢ − Σ (yᵢ − ȳ)·∂yᵢ/∂λ / σ̂²`. Returns `NaN` when the
/// transformed sample is constant.
pub fn box_cox_profile_score(values: &[f64], sum_ln: f64, lambda: f64) -> f64 {
    let n = values.len() as f64;
    let y: Vec<f64> = values.iter().map(|&x| box_cox(x, lambda)).collect();
    let mean = y.iter().sum::<f64>() / n;
    let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if var.is_nan() || var <= 0.0 {
        return f64::NAN;
    }
    let cross: f64 =
        values.iter().zip(&y).map(|(&x, &yi)| (yi - mean) * box_cox_dlambda(x, lambda)).sum();
    sum_ln - cross / var
}

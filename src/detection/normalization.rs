//! detection::normalization — normality screen with Box-Cox fallback.
//!
//! Purpose
//! -------
//! Produce the diagnostic view of a dataset: test the raw values for
//! normality and, when they fail and the data allow it, estimate a Box-Cox
//! λ by profile maximum likelihood, transform every value, and test again.
//!
//! Key behaviors
//! -------------
//! - Raw data that pass every normality test are used as-is
//!   (`use_fitted_results = true`, no λ).
//! - Otherwise the data must satisfy `min < max`, `min > 0`, and
//!   `count ≥ 8`; each unmet criterion is named in the status string.
//! - λ is fitted on the central sample `sorted[⌊0.1n⌋+1 .. ⌊0.9n⌋)` and
//!   then applied to all values.
//! - Fit failures leave `use_fitted_results = false` and put the error
//!   message in the status.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer works on an unconstrained θ with
//!   `λ = L · tanh(θ / L)`, `L = `[`LAMBDA_BOUND`], so trial steps never
//!   leave `(−L, L)` where `x^λ` stays representable. θ₀ maps to λ = 1.
//! - The maximized objective is `ℓ(λ) / n`, keeping gradients O(1)
//!   regardless of sample size. Its θ-gradient is analytic: the profile
//!   score chained through `dλ/dθ = sech²(θ / L)`.
//! - Results are diagnostics only; scoring always uses the raw values.
//!
//! Downstream usage
//! ----------------
//! - `detection::univariate` calls [`Normalizer::normalize`] and feeds the
//!   transformed values to the extended tests when `use_fitted_results`.

use ndarray::array;
use serde::Serialize;

use crate::{
    detection::{
        errors::{NormalizationError, NormalizationResult},
        normality::{NormalityReport, NormalityTester},
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{
            Grad, LogLikelihood, MLEOptions, Theta, maximize, validation::validate_positive_data,
        },
        numerical_stability::{box_cox_all, box_cox_profile_loglik, box_cox_profile_score},
    },
    statistics::{StatisticalSummary, quantile::sorted_copy},
};

/// Minimum sample size for a Box-Cox fit.
pub const BOXCOX_MIN_N: usize = 8;
/// Bound on |λ| during optimization.
pub const LAMBDA_BOUND: f64 = 5.0;
/// Minimum size of the central sample handed to the likelihood.
const FIT_MIN_N: usize = 3;

/// Map the unconstrained optimizer coordinate to λ.
#[inline]
pub fn lambda_from_theta(theta: f64) -> f64 {
    LAMBDA_BOUND * (theta / LAMBDA_BOUND).tanh()
}

/// Inverse of [`lambda_from_theta`] for `|λ| < LAMBDA_BOUND`.
#[inline]
pub fn theta_from_lambda(lambda: f64) -> f64 {
    LAMBDA_BOUND * (lambda / LAMBDA_BOUND).atanh()
}

/// Central slice `sorted[⌊0.1n⌋+1 .. ⌊0.9n⌋)` used to fit λ.
pub fn central_sample(values: &[f64]) -> Vec<f64> {
    let sorted = sorted_copy(values);
    let n = sorted.len();
    let lo = (n / 10 + 1).min(n);
    let hi = (9 * n / 10).max(lo);
    sorted[lo..hi].to_vec()
}

/// BoxCoxSample — validated positive data with its cached `Σ ln x`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxCoxSample {
    values: Vec<f64>,
    sum_ln: f64,
}

impl BoxCoxSample {
    /// Errors
    /// ------
    /// - `OptError::InsufficientData` below three points.
    /// - `OptError::NonPositiveData` for a non-positive or non-finite value.
    pub fn new(values: Vec<f64>) -> OptResult<Self> {
        validate_positive_data(&values, FIT_MIN_N)?;
        let sum_ln = values.iter().map(|x| x.ln()).sum();
        Ok(BoxCoxSample { values, sum_ln })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Per-observation Box-Cox profile log-likelihood in θ coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxCoxLogLik;

impl LogLikelihood for BoxCoxLogLik {
    type Data = BoxCoxSample;

    fn value(&self, theta: &Theta, data: &BoxCoxSample) -> OptResult<f64> {
        let lambda = lambda_from_theta(theta[0]);
        let ll = box_cox_profile_loglik(&data.values, data.sum_ln, lambda);
        if !ll.is_finite() {
            return Err(OptError::DegenerateTransform { lambda });
        }
        Ok(ll / data.values.len() as f64)
    }

    /// `d(ℓ/n)/dθ = (dℓ/dλ)/n · sech²(θ/L)`.
    fn grad(&self, theta: &Theta, data: &BoxCoxSample) -> OptResult<Grad> {
        let lambda = lambda_from_theta(theta[0]);
        let score = box_cox_profile_score(&data.values, data.sum_ln, lambda);
        if !score.is_finite() {
            return Err(OptError::DegenerateTransform { lambda });
        }
        let dlambda_dtheta = 1.0 - (theta[0] / LAMBDA_BOUND).tanh().powi(2);
        Ok(array![score / data.values.len() as f64 * dlambda_dtheta])
    }

    fn check(&self, theta: &Theta, _data: &BoxCoxSample) -> OptResult<()> {
        if theta.len() != 1 {
            return Err(OptError::ThetaLengthMismatch { expected: 1, actual: theta.len() });
        }
        if !theta[0].is_finite() {
            return Err(OptError::InvalidLambda { value: theta[0] });
        }
        Ok(())
    }
}

/// BoxCoxFit — fitted λ with the optimizer's iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCoxFit {
    pub lambda: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Estimate λ on `values` by maximizing the profile likelihood from λ = 1.
///
/// Errors
/// ------
/// - Data-domain errors from [`BoxCoxSample::new`].
/// - Optimizer errors from [`maximize`], including `DegenerateTransform`
///   when a trial λ makes the transformed sample constant.
pub fn fit_lambda(values: &[f64], opts: &MLEOptions) -> OptResult<BoxCoxFit> {
    let sample = BoxCoxSample::new(values.to_vec())?;
    let theta0 = array![theta_from_lambda(1.0)];
    let out = maximize(&BoxCoxLogLik, theta0, &sample, opts)?;
    let lambda = lambda_from_theta(out.theta_hat[0]);
    if !lambda.is_finite() {
        return Err(OptError::InvalidLambda { value: lambda });
    }
    Ok(BoxCoxFit { lambda, iterations: out.iterations, converged: out.converged })
}

/// NormalizationReport — what the normalizer did and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationReport {
    pub status: String,
    pub initial_normality: NormalityReport,
    pub lambda: Option<f64>,
    pub fitted_normality: Option<NormalityReport>,
    pub fit_iterations: Option<usize>,
}

/// Normalization — values for downstream diagnostics plus the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub use_fitted_results: bool,
    pub transformed_values: Vec<f64>,
    pub report: NormalizationReport,
}

/// Normalizer — runs the normality screen and the Box-Cox fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    tester: NormalityTester,
    mle: MLEOptions,
}

impl Normalizer {
    pub fn new(tester: NormalityTester, mle: MLEOptions) -> Self {
        Normalizer { tester, mle }
    }

    /// Screen `values` (summarized by `summary`) and normalize if needed.
    ///
    /// Never fails; fit errors are reported in `report.status`.
    pub fn normalize(&self, summary: &StatisticalSummary, values: &[f64]) -> Normalization {
        let initial = self.tester.run(values);
        if initial.all_pass() {
            tracing::debug!("raw data pass every normality test");
            return Normalization {
                use_fitted_results: true,
                transformed_values: values.to_vec(),
                report: NormalizationReport {
                    status: "Data already normal; no transformation applied.".to_string(),
                    initial_normality: initial,
                    lambda: None,
                    fitted_normality: None,
                    fit_iterations: None,
                },
            };
        }

        let unmet = unmet_criteria(summary);
        if !unmet.is_empty() {
            tracing::debug!(reasons = ?unmet, "skipping Box-Cox normalization");
            return Normalization {
                use_fitted_results: false,
                transformed_values: values.to_vec(),
                report: NormalizationReport {
                    status: format!("Box-Cox normalization skipped: {}.", unmet.join("; ")),
                    initial_normality: initial,
                    lambda: None,
                    fitted_normality: None,
                    fit_iterations: None,
                },
            };
        }

        match self.fit_and_transform(values) {
            Ok((fit, transformed)) => {
                let fitted = self.tester.run(&transformed);
                tracing::debug!(
                    lambda = fit.lambda,
                    iterations = fit.iterations,
                    normal_after_fit = fitted.all_pass(),
                    "Box-Cox fit complete"
                );
                let mut status = format!("Fitted Box-Cox lambda = {:.4}.", fit.lambda);
                if !fit.converged {
                    status.push_str(" Optimizer stopped before convergence.");
                }
                Normalization {
                    use_fitted_results: true,
                    transformed_values: transformed,
                    report: NormalizationReport {
                        status,
                        initial_normality: initial,
                        lambda: Some(fit.lambda),
                        fitted_normality: Some(fitted),
                        fit_iterations: Some(fit.iterations),
                    },
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "Box-Cox fit failed");
                Normalization {
                    use_fitted_results: false,
                    transformed_values: values.to_vec(),
                    report: NormalizationReport {
                        status: format!("Box-Cox fit failed: {err}"),
                        initial_normality: initial,
                        lambda: None,
                        fitted_normality: None,
                        fit_iterations: None,
                    },
                }
            }
        }
    }

    fn fit_and_transform(&self, values: &[f64]) -> NormalizationResult<(BoxCoxFit, Vec<f64>)> {
        let fit = fit_lambda(&central_sample(values), &self.mle)?;
        let transformed = box_cox_all(values, fit.lambda)?;
        if transformed.iter().any(|y| !y.is_finite()) {
            return Err(NormalizationError::Opt(OptError::DegenerateTransform {
                lambda: fit.lambda,
            }));
        }
        Ok((fit, transformed))
    }
}

fn unmet_criteria(summary: &StatisticalSummary) -> Vec<&'static str> {
    let mut unmet = Vec::new();
    if !summary.has_variance() {
        unmet.push("minimum value equals maximum value");
    }
    if summary.min <= 0.0 {
        unmet.push("minimum value is not positive");
    }
    if summary.count < BOXCOX_MIN_N {
        unmet.push("fewer than 8 observations");
    }
    unmet
}

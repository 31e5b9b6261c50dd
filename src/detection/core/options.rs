//! detection::core::options — configuration for a detection call.
//!
//! Purpose
//! -------
//! Bundle the knobs of one `detect_univariate_statistical` call: the two
//! classification parameters, the debug switch, and the settings of the
//! diagnostic branch (normality tests, Box-Cox fit, extended outlier tests).
//!
//! Key behaviors
//! -------------
//! - [`DetectionOptions`] carries `sensitivity_score` and
//!   `max_fractional_anomalies` **unvalidated**; out-of-range values are a
//!   soft failure reported by the orchestrator, not a construction error.
//! - [`NormalityOptions::new`] and [`ExtendedTestOptions::new`] validate
//!   their significance levels and return `StatResult`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Defaults: sensitivity 50, cap 1.0, debug off, α = 0.05 everywhere,
//!   Shapiro-Wilk limit 5000, D'Agostino minimum 8, GESD minimum 15, Dixon
//!   at 95 % confidence, normalization on.
//! - `boxcox_fit` is an already validated `MLEOptions`.
//!
//! Conventions
//! -----------
//! - Plain data carriers with public fields; builders never panic.

use crate::{
    optimization::loglik_optimizer::MLEOptions,
    statistical_tests::{
        dagostino::DAGOSTINO_MIN_N, dixon::DixonConfidence, errors::StatResult,
        shapiro_wilk::SHAPIRO_MAX_N, validation::validate_alpha,
    },
};

/// Default sensitivity score.
pub const DEFAULT_SENSITIVITY: f64 = 50.0;
/// Default anomaly cap.
pub const DEFAULT_MAX_FRACTION: f64 = 1.0;
/// Default significance level for every test.
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Minimum sample size before GESD is attempted.
pub const DEFAULT_GESD_MIN_N: usize = 15;

/// DetectionOptions — everything one detection call needs besides data.
///
/// Fields
/// ------
/// - `sensitivity_score`: expected in `(0, 100]`; higher flags more points.
/// - `max_fractional_anomalies`: expected in `(0, 1]`; cap on flagged share.
/// - `debug`: include weights and details in the response. Carried into
///   the outcome, which shapes the response from it.
/// - `normality`: normality-test settings.
/// - `extended`: Grubbs/GESD/Dixon settings.
/// - `run_normalization`: run the normality/Box-Cox diagnostic branch,
///   when `debug` or the extended tests need it.
/// - `boxcox_fit`: optimizer settings for the λ fit.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOptions {
    pub sensitivity_score: f64,
    pub max_fractional_anomalies: f64,
    pub debug: bool,
    pub normality: NormalityOptions,
    pub extended: ExtendedTestOptions,
    pub run_normalization: bool,
    pub boxcox_fit: MLEOptions,
}

impl DetectionOptions {
    /// Options with the given classification knobs and default diagnostics.
    ///
    /// No range checks are performed here.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::detection::core::options::DetectionOptions;
    ///
    /// let opts = DetectionOptions::new(150.0, 0.5, true);
    /// assert_eq!(opts.sensitivity_score, 150.0);
    /// assert!(opts.run_normalization);
    /// ```
    pub fn new(sensitivity_score: f64, max_fractional_anomalies: f64, debug: bool) -> Self {
        DetectionOptions { sensitivity_score, max_fractional_anomalies, debug, ..Self::default() }
    }
}

impl Default for DetectionOptions {
    fn default() -> Self {
        DetectionOptions {
            sensitivity_score: DEFAULT_SENSITIVITY,
            max_fractional_anomalies: DEFAULT_MAX_FRACTION,
            debug: false,
            normality: NormalityOptions::default(),
            extended: ExtendedTestOptions::default(),
            run_normalization: true,
            boxcox_fit: MLEOptions::default(),
        }
    }
}

/// NormalityOptions — significance level and applicability limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalityOptions {
    pub alpha: f64,
    pub shapiro_max_n: usize,
    pub dagostino_min_n: usize,
}

impl NormalityOptions {
    /// Validated constructor.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidAlpha` unless `0 < alpha < 1`.
    pub fn new(alpha: f64, shapiro_max_n: usize, dagostino_min_n: usize) -> StatResult<Self> {
        validate_alpha(alpha)?;
        Ok(NormalityOptions { alpha, shapiro_max_n, dagostino_min_n })
    }
}

impl Default for NormalityOptions {
    fn default() -> Self {
        NormalityOptions {
            alpha: DEFAULT_ALPHA,
            shapiro_max_n: SHAPIRO_MAX_N,
            dagostino_min_n: DAGOSTINO_MIN_N,
        }
    }
}

/// ExtendedTestOptions — settings for the Grubbs, GESD, and Dixon tests.
///
/// `gesd_max_outliers = None` means `⌊n/3⌋`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedTestOptions {
    pub enabled: bool,
    pub grubbs_alpha: f64,
    pub gesd_alpha: f64,
    pub gesd_max_outliers: Option<usize>,
    pub gesd_min_n: usize,
    pub dixon_confidence: DixonConfidence,
}

impl ExtendedTestOptions {
    /// Validated constructor for an enabled configuration.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidAlpha` if either α is outside `(0, 1)`.
    pub fn new(
        grubbs_alpha: f64, gesd_alpha: f64, gesd_max_outliers: Option<usize>,
        dixon_confidence: DixonConfidence,
    ) -> StatResult<Self> {
        validate_alpha(grubbs_alpha)?;
        validate_alpha(gesd_alpha)?;
        Ok(ExtendedTestOptions {
            enabled: true,
            grubbs_alpha,
            gesd_alpha,
            gesd_max_outliers,
            gesd_min_n: DEFAULT_GESD_MIN_N,
            dixon_confidence,
        })
    }

    /// Configuration that skips every extended test.
    pub fn disabled() -> Self {
        ExtendedTestOptions { enabled: false, ..Self::default() }
    }
}

impl Default for ExtendedTestOptions {
    fn default() -> Self {
        ExtendedTestOptions {
            enabled: true,
            grubbs_alpha: DEFAULT_ALPHA,
            gesd_alpha: DEFAULT_ALPHA,
            gesd_max_outliers: None,
            gesd_min_n: DEFAULT_GESD_MIN_N,
            dixon_confidence: DixonConfidence::NinetyFive,
        }
    }
}

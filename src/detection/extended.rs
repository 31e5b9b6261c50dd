//! detection::extended — Grubbs, GESD, and Dixon as per-point diagnostics.
//!
//! Runs the classical single- and multi-outlier tests on one sample and
//! reports, per test, either a per-point mask or the reason it did not run.
//! None of these results feed the anomaly score.
//!
//! Applicability
//! -------------
//! - Grubbs: any sample of three or more points with spread.
//! - GESD: `n ≥ gesd_min_n` (default 15); up to `⌊n/3⌋` outliers unless
//!   overridden.
//! - Dixon: `3 ≤ n ≤ 30`.

use serde::Serialize;

use crate::{
    detection::core::options::ExtendedTestOptions,
    statistical_tests::{
        dixon::{DIXON_MAX_N, DIXON_MIN_N, DixonOutcome},
        errors::{StatResult, StatTestError},
        gesd::GesdOutcome,
        grubbs::GrubbsOutcome,
    },
};

/// TestRun — what happened to one extended test.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestRun {
    Ran { flagged: usize },
    NotApplicable { reason: String },
    Failed { reason: String },
    Disabled,
}

impl TestRun {
    pub fn ran(&self) -> bool {
        matches!(self, TestRun::Ran { .. })
    }
}

/// TestsRun — status of each extended test for the diagnostics bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestsRun {
    pub grubbs: TestRun,
    pub gesd: TestRun,
    pub dixon: TestRun,
}

impl TestsRun {
    fn disabled() -> Self {
        TestsRun { grubbs: TestRun::Disabled, gesd: TestRun::Disabled, dixon: TestRun::Disabled }
    }
}

/// ExtendedResults — per-point masks (when a test ran) and statuses.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedResults {
    pub grubbs: Option<Vec<bool>>,
    pub gesd: Option<Vec<bool>>,
    pub dixon: Option<Vec<bool>>,
    pub tests_run: TestsRun,
}

impl ExtendedResults {
    /// Results for a configuration with every test switched off.
    pub fn disabled() -> Self {
        ExtendedResults { grubbs: None, gesd: None, dixon: None, tests_run: TestsRun::disabled() }
    }
}

/// Run every applicable extended test on `values`.
///
/// Masks are aligned with `values`.
///
/// Examples
/// --------
/// ```rust
/// use rust_anomaly::detection::core::options::ExtendedTestOptions;
/// use rust_anomaly::detection::extended::run_extended;
///
/// let values = [10.0, 10.2, 9.9, 10.1, 9.8, 10.0, 30.0];
/// let out = run_extended(&values, &ExtendedTestOptions::default());
/// assert_eq!(out.grubbs.as_ref().map(|m| m[6]), Some(true));
/// assert!(out.gesd.is_none());
/// ```
pub fn run_extended(values: &[f64], opts: &ExtendedTestOptions) -> ExtendedResults {
    if !opts.enabled {
        return ExtendedResults::disabled();
    }
    let n = values.len();

    let (grubbs, grubbs_run) =
        settle(GrubbsOutcome::grubbs(values, opts.grubbs_alpha).map(GrubbsOutcome::into_mask));

    let (gesd, gesd_run) = if n < opts.gesd_min_n {
        not_applicable(format!("requires at least {} observations, found {n}", opts.gesd_min_n))
    } else {
        let r = opts.gesd_max_outliers.unwrap_or(n / 3);
        settle(GesdOutcome::gesd(values, r, opts.gesd_alpha).map(GesdOutcome::into_mask))
    };

    let (dixon, dixon_run) = if !(DIXON_MIN_N..=DIXON_MAX_N).contains(&n) {
        not_applicable(format!(
            "requires between {DIXON_MIN_N} and {DIXON_MAX_N} observations, found {n}"
        ))
    } else {
        settle(DixonOutcome::dixon(values, opts.dixon_confidence).map(DixonOutcome::into_mask))
    };

    tracing::trace!(?grubbs_run, ?gesd_run, ?dixon_run, "extended tests complete");

    ExtendedResults {
        grubbs,
        gesd,
        dixon,
        tests_run: TestsRun { grubbs: grubbs_run, gesd: gesd_run, dixon: dixon_run },
    }
}

fn settle(result: StatResult<Vec<bool>>) -> (Option<Vec<bool>>, TestRun) {
    match result {
        Ok(mask) => {
            let flagged = mask.iter().filter(|&&m| m).count();
            (Some(mask), TestRun::Ran { flagged })
        }
        Err(StatTestError::ZeroVariance) => {
            not_applicable("all observations are identical".to_string())
        }
        Err(err) => (None, TestRun::Failed { reason: err.to_string() }),
    }
}

fn not_applicable(reason: String) -> (Option<Vec<bool>>, TestRun) {
    (None, TestRun::NotApplicable { reason })
}

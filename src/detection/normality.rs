//! detection::normality — three-test normality screen with narratives.
//!
//! Purpose
//! -------
//! Decide whether a sample looks Gaussian by running Shapiro-Wilk,
//! D'Agostino-Pearson K², and Anderson-Darling, and record each verdict as
//! a short human-readable narrative for the diagnostics bundle.
//!
//! Key behaviors
//! -------------
//! - Shapiro-Wilk is skipped (and counted as passing) when
//!   `n ≥ shapiro_max_n`; D'Agostino-Pearson is skipped (passing) when
//!   `n < dagostino_min_n`.
//! - The p-value tests pass when `p > α`; Anderson-Darling passes when A²
//!   is below the critical value at every tabulated level.
//! - A test that cannot be computed (e.g. zero variance) fails, with the
//!   error message in its narrative.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sample is already validated finite by the caller.
//! - [`NormalityReport::all_pass`] is the only policy used downstream: the
//!   data are treated as normal iff all three verdicts pass.

use serde::Serialize;

use crate::{
    detection::core::options::NormalityOptions,
    statistical_tests::{
        anderson_darling::ADOutcome, dagostino::K2Outcome, errors::StatResult,
        shapiro_wilk::SWOutcome,
    },
};

/// TestVerdict — pass/fail outcome of one test with its narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestVerdict {
    pub passes: bool,
    pub narrative: String,
}

impl TestVerdict {
    fn skipped(reason: String) -> Self {
        TestVerdict { passes: true, narrative: reason }
    }

    fn failed(test: &str, err: impl std::fmt::Display) -> Self {
        TestVerdict { passes: false, narrative: format!("{test} could not be computed: {err}") }
    }
}

/// NormalityReport — verdicts of the three normality tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalityReport {
    pub shapiro_wilk: TestVerdict,
    pub dagostino: TestVerdict,
    pub anderson_darling: TestVerdict,
}

impl NormalityReport {
    /// `true` iff every test passes.
    pub fn all_pass(&self) -> bool {
        self.shapiro_wilk.passes && self.dagostino.passes && self.anderson_darling.passes
    }
}

/// NormalityTester — runs the three tests under one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalityTester {
    opts: NormalityOptions,
}

impl NormalityTester {
    pub fn new(opts: NormalityOptions) -> Self {
        NormalityTester { opts }
    }

    pub fn options(&self) -> &NormalityOptions {
        &self.opts
    }

    /// Run all three tests on `values`.
    ///
    /// Never fails: computation errors become failing verdicts.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::detection::core::options::NormalityOptions;
    /// use rust_anomaly::detection::normality::NormalityTester;
    ///
    /// let tester = NormalityTester::new(NormalityOptions::default());
    /// let report = tester.run(&[5.0; 10]);
    /// assert!(!report.all_pass());
    /// ```
    pub fn run(&self, values: &[f64]) -> NormalityReport {
        NormalityReport {
            shapiro_wilk: self.shapiro_wilk(values),
            dagostino: self.dagostino(values),
            anderson_darling: anderson_darling(values),
        }
    }

    fn shapiro_wilk(&self, values: &[f64]) -> TestVerdict {
        let n = values.len();
        if n >= self.opts.shapiro_max_n {
            return TestVerdict::skipped(format!(
                "Shapiro-Wilk skipped: {n} observations (limit {}).",
                self.opts.shapiro_max_n
            ));
        }
        self.p_value_verdict("Shapiro-Wilk", SWOutcome::shapiro_wilk(values), |o| {
            (format!("W = {:.4}", o.w()), o.p_value())
        })
    }

    fn dagostino(&self, values: &[f64]) -> TestVerdict {
        let n = values.len();
        if n < self.opts.dagostino_min_n {
            return TestVerdict::skipped(format!(
                "D'Agostino-Pearson skipped: {n} observations (minimum {}).",
                self.opts.dagostino_min_n
            ));
        }
        self.p_value_verdict("D'Agostino-Pearson", K2Outcome::dagostino_pearson(values), |o| {
            (format!("K2 = {:.4}", o.stat()), o.p_value())
        })
    }

    fn p_value_verdict<T>(
        &self, test: &str, outcome: StatResult<T>, summarize: impl FnOnce(&T) -> (String, f64),
    ) -> TestVerdict {
        let alpha = self.opts.alpha;
        match outcome {
            Ok(out) => {
                let (stat, p) = summarize(&out);
                let passes = p > alpha;
                let verdict = if passes { "consistent with" } else { "rejects" };
                TestVerdict {
                    passes,
                    narrative: format!(
                        "{test}: {stat}, p = {p:.4}; {verdict} normality at alpha = {alpha}."
                    ),
                }
            }
            Err(err) => TestVerdict::failed(test, err),
        }
    }
}

fn anderson_darling(values: &[f64]) -> TestVerdict {
    match ADOutcome::anderson_darling(values) {
        Ok(out) => {
            let failing: Vec<String> =
                out.levels().filter(|(_, _, ok)| !ok).map(|(sig, _, _)| format!("{sig}%")).collect();
            let passes = failing.is_empty();
            let narrative = if passes {
                format!("Anderson-Darling: A2 = {:.4}, below every critical value.", out.stat())
            } else {
                format!(
                    "Anderson-Darling: A2 = {:.4}, rejects normality at {}.",
                    out.stat(),
                    failing.join(", ")
                )
            };
            TestVerdict { passes, narrative }
        }
        Err(err) => TestVerdict::failed("Anderson-Darling", err),
    }
}

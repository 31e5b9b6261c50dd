//! detection::univariate — the ensemble detector entry point.
//!
//! Purpose
//! -------
//! Score every value of a univariate dataset with the SD/MAD/IQR ensemble,
//! flag anomalies under the caller's sensitivity and cap, and attach the
//! diagnostic branch (normality screen, Box-Cox fit, extended tests).
//!
//! Key behaviors
//! -------------
//! - Invalid requests are *soft* failures: every observation is echoed with
//!   a zero score and no flag, and the details carry the fixed message.
//! - Scores always come from the raw values. The normalized view only feeds
//!   the extended tests and diagnostics.
//! - `opts.debug` decides what the response carries. Without it, and with
//!   the extended tests switched off, the normality/Box-Cox branch is
//!   skipped since nothing would report it.
//! - At or above [`PARALLEL_THRESHOLD`] points, per-point scoring runs on
//!   the rayon pool; output order is the input order either way.
//!
//! Invariants & assumptions
//! ------------------------
//! - One output record per input observation, in order, for every input
//!   including empty and rejected ones.
//! - The function is pure and deterministic; no state survives the call.
//!
//! Conventions
//! -----------
//! - Extended tests run on the normalized values when the normalizer
//!   reports `use_fitted_results`, on the raw values when normalization is
//!   switched off, and are marked not applicable otherwise.
//!
//! Downstream usage
//! ----------------
//! - Transport layers call [`detect_univariate_statistical`] and serialize
//!   [`DetectionOutcome::into_response`].

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    detection::{
        classify::{anomaly_threshold, classify},
        core::{
            data::{AnnotatedObservation, Observation},
            options::DetectionOptions,
            validation::validate_request,
        },
        diagnostics::{Details, Diagnostics, ENSEMBLE_MESSAGE},
        distance::{DistanceScores, distance_scores},
        extended::{ExtendedResults, TestRun, TestsRun, run_extended},
        normality::NormalityTester,
        normalization::{Normalization, Normalizer},
        scoring::Weights,
    },
    statistics::StatisticalSummary,
};

/// Dataset size at which per-point scoring switches to `par_iter`.
pub const PARALLEL_THRESHOLD: usize = 50_000;

/// DetectionOutcome — annotated observations, weights, and details, plus
/// the request's `debug` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    anomalies: Vec<AnnotatedObservation>,
    weights: Weights,
    details: Details,
    debug: bool,
}

impl DetectionOutcome {
    fn rejected(observations: &[Observation], message: String, debug: bool) -> Self {
        DetectionOutcome {
            anomalies: observations.iter().map(AnnotatedObservation::rejected).collect(),
            weights: Weights::default(),
            details: Details::Rejected { message },
            debug,
        }
    }

    pub fn anomalies(&self) -> &[AnnotatedObservation] {
        &self.anomalies
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Whether the request asked for weights and details in the response.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Number of flagged observations.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.iter().filter(|a| a.is_anomaly).count()
    }

    /// Shape the transport response; weights and details only under `debug`.
    pub fn into_response(self) -> DetectionResponse {
        DetectionResponse {
            anomalies: self.anomalies,
            weights: self.debug.then_some(self.weights),
            details: self.debug.then_some(self.details),
        }
    }
}

/// DetectionResponse — serializable `{anomalies, weights?, details?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResponse {
    pub anomalies: Vec<AnnotatedObservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Weights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

/// Detect anomalies in `observations` with the SD/MAD/IQR ensemble.
///
/// Parameters
/// ----------
/// - `observations`: ordered `(key, value)` pairs; keys are opaque.
/// - `opts`: classification knobs and diagnostic settings. The sensitivity
///   and cap are validated here, not at construction.
///
/// Returns
/// -------
/// - A [`DetectionOutcome`] with one record per observation. Invalid
///   requests yield zeroed records and a [`Details::Rejected`] message.
///
/// Examples
/// --------
/// ```rust
/// use rust_anomaly::detection::prelude::*;
///
/// let mut pairs: Vec<(String, f64)> = (1..=10).map(|i| (i.to_string(), i as f64)).collect();
/// pairs.push(("spike".to_string(), 90.0));
/// let obs = Observation::from_pairs(pairs);
///
/// let out = detect_univariate_statistical(&obs, &DetectionOptions::new(50.0, 0.5, false));
/// assert_eq!(out.anomaly_count(), 1);
/// assert!(out.anomalies()[10].is_anomaly);
/// ```
pub fn detect_univariate_statistical(
    observations: &[Observation], opts: &DetectionOptions,
) -> DetectionOutcome {
    let values: Vec<f64> = observations.iter().map(|o| o.value).collect();

    if let Err(failure) =
        validate_request(&values, opts.sensitivity_score, opts.max_fractional_anomalies)
    {
        tracing::debug!(n = values.len(), reason = ?failure, "rejecting detection request");
        return DetectionOutcome::rejected(observations, failure.to_string(), opts.debug);
    }
    let summary = match StatisticalSummary::from_values(&values) {
        Ok(summary) => summary,
        Err(err) => {
            return DetectionOutcome::rejected(observations, err.to_string(), opts.debug);
        }
    };

    let wants_normalization = opts.run_normalization && (opts.debug || opts.extended.enabled);
    let normalization = wants_normalization.then(|| {
        Normalizer::new(NormalityTester::new(opts.normality), opts.boxcox_fit.clone())
            .normalize(&summary, &values)
    });
    let extended = extended_for(&values, normalization.as_ref(), opts);

    let weights = Weights::default();
    let distances = score_distances(&values, &summary);
    let scores: Vec<f64> = distances.iter().map(|d| weights.score(d)).collect();
    let threshold =
        anomaly_threshold(&scores, opts.sensitivity_score, opts.max_fractional_anomalies);
    let flags = classify(&scores, threshold);

    let anomalies: Vec<AnnotatedObservation> = observations
        .iter()
        .enumerate()
        .map(|(i, obs)| AnnotatedObservation {
            key: obs.key.clone(),
            value: obs.value,
            sds: distances[i].sds,
            mads: distances[i].mads,
            iqrs: distances[i].iqrs,
            anomaly_score: scores[i],
            is_anomaly: flags[i],
            grubbs: extended.grubbs.as_ref().map(|m| m[i]),
            gesd: extended.gesd.as_ref().map(|m| m[i]),
            dixon: extended.dixon.as_ref().map(|m| m[i]),
        })
        .collect();
    let anomaly_count = flags.iter().filter(|&&f| f).count();
    tracing::debug!(n = values.len(), threshold, anomaly_count, "univariate detection complete");

    let diagnostics = Diagnostics {
        message: ENSEMBLE_MESSAGE.to_string(),
        summary,
        normalization: normalization.map(|norm| norm.report),
        tests_run: extended.tests_run,
        threshold,
        anomaly_count,
    };

    DetectionOutcome {
        anomalies,
        weights,
        details: Details::Diagnostics(Box::new(diagnostics)),
        debug: opts.debug,
    }
}

fn score_distances(values: &[f64], summary: &StatisticalSummary) -> Vec<DistanceScores> {
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter().map(|&v| distance_scores(v, summary)).collect()
    } else {
        values.iter().map(|&v| distance_scores(v, summary)).collect()
    }
}

fn extended_for(
    values: &[f64], normalization: Option<&Normalization>, opts: &DetectionOptions,
) -> ExtendedResults {
    if !opts.extended.enabled {
        return ExtendedResults::disabled();
    }
    match normalization {
        None => run_extended(values, &opts.extended),
        Some(norm) if norm.use_fitted_results => {
            run_extended(&norm.transformed_values, &opts.extended)
        }
        Some(_) => {
            let skipped = || TestRun::NotApplicable {
                reason: "data could not be normalized".to_string(),
            };
            ExtendedResults {
                grubbs: None,
                gesd: None,
                dixon: None,
                tests_run: TestsRun { grubbs: skipped(), gesd: skipped(), dixon: skipped() },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{
        core::options::ExtendedTestOptions,
        errors::{MSG_INVALID_MAX_FRACTION, MSG_TOO_FEW_POINTS},
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Soft rejection with zeroed, order-preserving output.
    // - The ensemble message and diagnostics on a valid request.
    // - Response shaping driven by `DetectionOptions::debug`, and skipping
    //   the normality branch when nothing would report it.
    // - A single copy of the raw-data normality verdicts in diagnostics.
    // - Extended-test routing when normalization is off or fails.
    //
    // The fixture sweep and property tests live in `tests/`.
    // -------------------------------------------------------------------------

    fn obs(values: &[f64]) -> Vec<Observation> {
        values.iter().enumerate().map(|(i, &v)| Observation::new(format!("k{i}"), v)).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a two-point request is echoed back unscored.
    //
    // Given
    // -----
    // - Two observations with default options.
    //
    // Expect
    // ------
    // - Two zeroed records in order and the too-few-points message.
    fn two_points_are_rejected_softly() {
        // Arrange
        let input = obs(&[1.0, 100.0]);

        // Act
        let out = detect_univariate_statistical(&input, &DetectionOptions::default());

        // Assert
        assert_eq!(out.anomalies().len(), 2);
        assert_eq!(out.anomalies()[1].key, "k1");
        assert!(out.anomalies().iter().all(|a| !a.is_anomaly && a.anomaly_score == 0.0));
        assert_eq!(out.details().message(), MSG_TOO_FEW_POINTS);
        assert!(out.details().is_rejection());
    }

    #[test]
    // Purpose
    // -------
    // Ensure an invalid cap is rejected before scoring.
    //
    // Given
    // -----
    // - Five observations with cap 0.
    //
    // Expect
    // ------
    // - The cap message and no flags.
    fn invalid_cap_is_rejected() {
        // Arrange
        let input = obs(&[1.0, 2.0, 3.0, 4.0, 50.0]);

        // Act
        let out = detect_univariate_statistical(&input, &DetectionOptions::new(50.0, 0.0, false));

        // Assert
        assert_eq!(out.details().message(), MSG_INVALID_MAX_FRACTION);
        assert_eq!(out.anomaly_count(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Check diagnostics on a valid request.
    //
    // Given
    // -----
    // - 1..=10 followed by 90, sensitivity 50, cap 0.5.
    //
    // Expect
    // ------
    // - Ensemble message, one anomaly, summary count 11, normalization
    //   report present, threshold at least 0.5.
    fn valid_request_carries_diagnostics() {
        // Arrange
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(90.0);
        let input = obs(&values);

        // Act
        let out = detect_univariate_statistical(&input, &DetectionOptions::new(50.0, 0.5, true));

        // Assert
        assert_eq!(out.details().message(), ENSEMBLE_MESSAGE);
        let diag = out.details().diagnostics().unwrap();
        assert_eq!(diag.summary.count, 11);
        assert_eq!(diag.anomaly_count, 1);
        assert!(diag.normalization.is_some());
        assert!(diag.threshold >= 0.5);
        assert!(out.anomalies()[10].is_anomaly);
    }

    #[test]
    // Purpose
    // -------
    // Verify that weights and details are dropped without `debug`.
    //
    // Given
    // -----
    // - A valid five-point request run with debug off and on.
    //
    // Expect
    // ------
    // - `None`/`None` without debug; both present with debug.
    fn into_response_respects_debug() {
        // Arrange
        let input = obs(&[1.0, 2.0, 3.0, 4.0, 50.0]);

        // Act
        let quiet_out = detect_univariate_statistical(&input, &DetectionOptions::default());
        let verbose_out =
            detect_univariate_statistical(&input, &DetectionOptions::new(50.0, 1.0, true));
        let (quiet_debug, verbose_debug) = (quiet_out.debug(), verbose_out.debug());
        let quiet = quiet_out.into_response();
        let verbose = verbose_out.into_response();

        // Assert
        assert!(!quiet_debug && verbose_debug);
        assert!(quiet.weights.is_none() && quiet.details.is_none());
        assert_eq!(verbose.weights, Some(Weights::default()));
        assert!(verbose.details.is_some());
        assert_eq!(quiet.anomalies, verbose.anomalies);
    }

    #[test]
    // Purpose
    // -------
    // Check extended-test routing.
    //
    // Given
    // -----
    // - [−5, 0.9, 0.95, 1, 1, 1.05, 1.1, 200]: not normal and not positive.
    // - The same data with normalization switched off.
    //
    // Expect
    // ------
    // - Extended tests not applicable in the first case and no masks.
    // - Grubbs runs on the raw values in the second case.
    fn extended_tests_follow_normalization_outcome() {
        // Arrange
        let input = obs(&[-5.0, 0.9, 0.95, 1.0, 1.0, 1.05, 1.1, 200.0]);
        let raw_opts = DetectionOptions { run_normalization: false, ..DetectionOptions::default() };

        // Act
        let normalized = detect_univariate_statistical(&input, &DetectionOptions::default());
        let raw = detect_univariate_statistical(&input, &raw_opts);

        // Assert
        let diag = normalized.details().diagnostics().unwrap();
        let report = diag.normalization.as_ref().unwrap();
        assert!(report.status.contains("minimum value is not positive"));
        assert!(matches!(diag.tests_run.grubbs, TestRun::NotApplicable { .. }));
        assert!(normalized.anomalies().iter().all(|a| a.grubbs.is_none()));
        let raw_diag = raw.details().diagnostics().unwrap();
        assert!(raw_diag.tests_run.grubbs.ran());
        assert!(raw_diag.normalization.is_none());
        assert!(raw.anomalies().iter().all(|a| a.grubbs.is_some()));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the normality branch only runs when something reports it.
    //
    // Given
    // -----
    // - Skewed positive data with extended tests off, run with debug off
    //   and with debug on.
    //
    // Expect
    // ------
    // - No normalization report without debug; a report with debug.
    // - Identical scores either way.
    fn normality_branch_is_skipped_when_unreported() {
        // Arrange
        let values: Vec<f64> = (0..20).map(|k| 2f64.powf(k as f64 / 2.0)).collect();
        let input = obs(&values);
        let quiet = DetectionOptions {
            extended: ExtendedTestOptions::disabled(),
            ..DetectionOptions::new(50.0, 1.0, false)
        };
        let verbose = DetectionOptions { debug: true, ..quiet.clone() };

        // Act
        let quiet_out = detect_univariate_statistical(&input, &quiet);
        let verbose_out = detect_univariate_statistical(&input, &verbose);

        // Assert
        assert!(quiet_out.details().diagnostics().unwrap().normalization.is_none());
        assert!(verbose_out.details().diagnostics().unwrap().normalization.is_some());
        let scores = |o: &DetectionOutcome| -> Vec<f64> {
            o.anomalies().iter().map(|a| a.anomaly_score).collect()
        };
        assert_eq!(scores(&quiet_out), scores(&verbose_out));
    }

    #[test]
    // Purpose
    // -------
    // Verify the raw-data normality verdicts are serialized once.
    //
    // Given
    // -----
    // - 1..=10 followed by 90, debug on.
    //
    // Expect
    // ------
    // - `details.normalization.initial_normality` present and no top-level
    //   `details.initial_normality`.
    fn initial_normality_is_reported_once() {
        // Arrange
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(90.0);
        let input = obs(&values);

        // Act
        let out = detect_univariate_statistical(&input, &DetectionOptions::new(50.0, 0.5, true));
        let json = serde_json::to_value(out.into_response()).unwrap();

        // Assert
        let details = &json["details"];
        assert!(details.get("initial_normality").is_none());
        assert!(details["normalization"]["initial_normality"].is_object());
    }
}

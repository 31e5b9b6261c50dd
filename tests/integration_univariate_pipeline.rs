//! Integration tests for the univariate ensemble detector.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: observations in, validated request,
//!   summary, distance checks, weighted scores, classification, and the
//!   diagnostic branch, out to a serializable response.
//! - Pin the reference fixture and its sensitivity sweep.
//!
//! Coverage
//! --------
//! - `detection::univariate::detect_univariate_statistical`:
//!   - Sensitivity sweep and cap sweep on the reference fixture.
//!   - Single dominant outlier.
//!   - Soft rejections and their fixed messages.
//!   - Cardinality for 0, 1, and 2 points; determinism.
//! - `detection::univariate::DetectionOutcome::into_response`:
//!   - JSON shape with `debug` off and on.
//! - `detection::normalization` through the orchestrator:
//!   - Box-Cox diagnostics on skewed positive data.
//! - Large inputs:
//!   - GESD at the default candidate count on 50 000+ points.
//!   - The rayon scoring path at `PARALLEL_THRESHOLD`.
//!
//! Exclusions
//! ----------
//! - Numerical details of the individual tests and the optimizer, covered
//!   by unit tests.
//! - Python bindings.
use rust_anomaly::detection::{
    Details, ENSEMBLE_MESSAGE,
    core::{data::Observation, options::DetectionOptions},
    errors::{MSG_INVALID_MAX_FRACTION, MSG_INVALID_SENSITIVITY, MSG_TOO_FEW_POINTS},
    distance::distance_scores,
    extended::TestRun,
    scoring::Weights,
    univariate::{PARALLEL_THRESHOLD, detect_univariate_statistical},
};
use rust_anomaly::statistics::StatisticalSummary;

const FIXTURE: [f64; 17] =
    [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 2550.0, 9000.0];

/// Bounded sawtooth in `[0, 10)` of length `n`.
fn sawtooth(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7919) % 1000) as f64 / 100.0).collect()
}

/// Keyed observations `"k0".."k{n-1}"` for `values`.
fn observations(values: &[f64]) -> Vec<Observation> {
    values.iter().enumerate().map(|(i, &v)| Observation::new(format!("k{i}"), v)).collect()
}

fn flagged(values: &[f64], sensitivity: f64, cap: f64) -> usize {
    detect_univariate_statistical(
        &observations(values),
        &DetectionOptions::new(sensitivity, cap, false),
    )
    .anomaly_count()
}

#[test]
// Purpose
// -------
// Pin the sensitivity sweep of the reference fixture.
//
// Given
// -----
// - The 17-point fixture with cap 1.0.
//
// Expect
// ------
// - 100 → 17, 95 → 15, 85 → 8, 75 → 5, 50 → 2, 25 → 2, 1 → 1.
fn fixture_sensitivity_sweep() {
    // Arrange
    let sweep = [(100.0, 17), (95.0, 15), (85.0, 8), (75.0, 5), (50.0, 2), (25.0, 2), (1.0, 1)];

    for (sensitivity, expected) in sweep {
        // Act
        let count = flagged(&FIXTURE, sensitivity, 1.0);

        // Assert
        assert_eq!(count, expected, "sensitivity {sensitivity}");
    }
}

#[test]
// Purpose
// -------
// Verify the two gross values are the ones flagged at sensitivity 50.
//
// Given
// -----
// - The fixture at sensitivity 50, cap 1.0.
//
// Expect
// ------
// - Exactly the points 2550 and 9000 flagged, both with score 1.05.
fn fixture_flags_the_gross_values() {
    // Arrange
    let input = observations(&FIXTURE);

    // Act
    let out = detect_univariate_statistical(&input, &DetectionOptions::new(50.0, 1.0, false));

    // Assert
    let flagged: Vec<f64> =
        out.anomalies().iter().filter(|a| a.is_anomaly).map(|a| a.value).collect();
    assert_eq!(flagged, vec![2550.0, 9000.0]);
    let last = &out.anomalies()[16];
    assert!((last.anomaly_score - 1.05).abs() < 1e-12);
}

#[test]
// Purpose
// -------
// Check that tightening the cap never increases the flag count.
//
// Given
// -----
// - The fixture at sensitivity 100 with caps 0.01, 0.1, 0.3, 0.5, 1.0.
//
// Expect
// ------
// - Counts 1, 2, 5, 8, 17.
fn fixture_cap_sweep() {
    let sweep = [(0.01, 1), (0.1, 2), (0.3, 5), (0.5, 8), (1.0, 17)];
    for (cap, expected) in sweep {
        assert_eq!(flagged(&FIXTURE, 100.0, cap), expected, "cap {cap}");
    }
}

#[test]
// Purpose
// -------
// Verify a single dominant outlier is isolated.
//
// Given
// -----
// - 1..=10 followed by 90, sensitivity 50, cap 0.5.
//
// Expect
// ------
// - One flag, on the last point.
fn single_dominant_outlier() {
    // Arrange
    let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
    values.push(90.0);

    // Act
    let out = detect_univariate_statistical(
        &observations(&values),
        &DetectionOptions::new(50.0, 0.5, false),
    );

    // Assert
    assert_eq!(out.anomaly_count(), 1);
    assert!(out.anomalies()[10].is_anomaly);
    assert_eq!(out.details().message(), ENSEMBLE_MESSAGE);
}

#[test]
// Purpose
// -------
// Ensure invalid parameters are rejected with their fixed messages and
// zeroed output.
//
// Given
// -----
// - The fixture with cap 1.5, cap 0, sensitivity 0, sensitivity 101.
//
// Expect
// ------
// - The matching message; 17 records with zero score and no flag.
fn invalid_parameters_are_rejected() {
    // Arrange
    let cases = [
        (50.0, 1.5, MSG_INVALID_MAX_FRACTION),
        (50.0, 0.0, MSG_INVALID_MAX_FRACTION),
        (0.0, 0.5, MSG_INVALID_SENSITIVITY),
        (101.0, 0.5, MSG_INVALID_SENSITIVITY),
    ];
    let input = observations(&FIXTURE);

    for (sensitivity, cap, message) in cases {
        // Act
        let out =
            detect_univariate_statistical(&input, &DetectionOptions::new(sensitivity, cap, true));

        // Assert
        assert_eq!(out.details().message(), message);
        assert_eq!(out.anomalies().len(), FIXTURE.len());
        assert!(out.anomalies().iter().all(|a| !a.is_anomaly && a.anomaly_score == 0.0));
    }
}

#[test]
// Purpose
// -------
// Verify cardinality is preserved for degenerate sizes.
//
// Given
// -----
// - Datasets of 0, 1, and 2 points.
//
// Expect
// ------
// - Same number of records out, the too-few-points message, no flags.
fn tiny_datasets_keep_cardinality() {
    for n in 0..3 {
        // Arrange
        let values: Vec<f64> = (0..n).map(|i| i as f64 * 100.0).collect();

        // Act
        let out = detect_univariate_statistical(
            &observations(&values),
            &DetectionOptions::default(),
        );

        // Assert
        assert_eq!(out.anomalies().len(), n);
        assert_eq!(out.details().message(), MSG_TOO_FEW_POINTS);
        assert_eq!(out.anomaly_count(), 0);
    }
}

#[test]
// Purpose
// -------
// Ensure repeated calls produce identical results.
//
// Given
// -----
// - The fixture with default options, run twice.
//
// Expect
// ------
// - Equal outcomes, including diagnostics.
fn detection_is_deterministic() {
    // Arrange
    let input = observations(&FIXTURE);
    let opts = DetectionOptions::default();

    // Act
    let first = detect_univariate_statistical(&input, &opts);
    let second = detect_univariate_statistical(&input, &opts);

    // Assert
    assert_eq!(first, second);
}

#[test]
// Purpose
// -------
// Check the serialized response shape with and without debug.
//
// Given
// -----
// - The fixture at defaults, run with debug off and on.
//
// Expect
// ------
// - Only `anomalies` without debug; `weights` and `details.message` with
//   debug; snake_case per-point fields.
fn response_json_shape() {
    // Arrange
    let input = observations(&FIXTURE);
    let verbose_opts = DetectionOptions { debug: true, ..DetectionOptions::default() };

    // Act
    let quiet = detect_univariate_statistical(&input, &DetectionOptions::default());
    let verbose = detect_univariate_statistical(&input, &verbose_opts);
    let quiet = serde_json::to_value(quiet.into_response()).unwrap();
    let verbose = serde_json::to_value(verbose.into_response()).unwrap();

    // Assert
    let quiet_keys: Vec<&String> = quiet.as_object().unwrap().keys().collect();
    assert_eq!(quiet_keys, vec!["anomalies"]);
    let first = &quiet["anomalies"][0];
    for field in ["key", "value", "sds", "mads", "iqrs", "anomaly_score", "is_anomaly"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert_eq!(verbose["weights"]["mads"], serde_json::json!(0.45));
    assert_eq!(verbose["details"]["message"], serde_json::json!(ENSEMBLE_MESSAGE));
    assert!(verbose["details"]["summary"]["median"].is_number());
}

#[test]
// Purpose
// -------
// Verify rejections serialize as a bare message under debug.
//
// Given
// -----
// - Two points with debug on.
//
// Expect
// ------
// - `details == {"message": ...}` and `Details::Rejected`.
fn rejection_details_serialize_as_message() {
    // Arrange
    let out = detect_univariate_statistical(
        &observations(&[1.0, 2.0]),
        &DetectionOptions::new(50.0, 1.0, true),
    );

    // Act
    let json = serde_json::to_value(out.clone().into_response()).unwrap();

    // Assert
    assert!(matches!(out.details(), Details::Rejected { .. }));
    assert_eq!(json["details"], serde_json::json!({ "message": MSG_TOO_FEW_POINTS }));
}

#[test]
// Purpose
// -------
// Check the Box-Cox diagnostics surface on skewed positive data while
// scores stay on the raw scale.
//
// Given
// -----
// - 2^(k/3) for k = 0..30 (geometric growth) at defaults.
//
// Expect
// ------
// - A fitted λ in the normalization report, extended tests run, and
//   scores identical to a run with normalization switched off.
fn normalization_is_diagnostic_only() {
    // Arrange
    let values: Vec<f64> = (0..30).map(|k| 2f64.powf(k as f64 / 3.0)).collect();
    let input = observations(&values);
    let with_norm = DetectionOptions::default();
    let without_norm = DetectionOptions { run_normalization: false, ..DetectionOptions::default() };

    // Act
    let normalized = detect_univariate_statistical(&input, &with_norm);
    let raw = detect_univariate_statistical(&input, &without_norm);

    // Assert
    let diag = normalized.details().diagnostics().unwrap();
    let report = diag.normalization.as_ref().unwrap();
    assert!(report.lambda.is_some(), "{}", report.status);
    assert!(matches!(diag.tests_run.grubbs, TestRun::Ran { .. }));
    let scores = |o: &rust_anomaly::detection::DetectionOutcome| -> Vec<f64> {
        o.anomalies().iter().map(|a| a.anomaly_score).collect()
    };
    assert_eq!(scores(&normalized), scores(&raw));
}

#[test]
// Purpose
// -------
// Ensure GESD at its default candidate count scales to large inputs and
// still isolates the planted outliers.
//
// Given
// -----
// - A 50 000-point sawtooth plus gross values at positions 10 and 40 000,
//   normalization off so the extended tests see the raw values.
//
// Expect
// ------
// - GESD ran and flagged exactly the two planted positions.
fn gesd_runs_on_large_inputs() {
    // Arrange
    let mut values = sawtooth(50_000);
    values[10] = 900.0;
    values[40_000] = -850.0;
    let input = observations(&values);
    let opts = DetectionOptions { run_normalization: false, ..DetectionOptions::default() };

    // Act
    let out = detect_univariate_statistical(&input, &opts);

    // Assert
    let diag = out.details().diagnostics().unwrap();
    assert_eq!(diag.tests_run.gesd, TestRun::Ran { flagged: 2 });
    assert_eq!(out.anomalies()[10].gesd, Some(true));
    assert_eq!(out.anomalies()[40_000].gesd, Some(true));
}

#[test]
// Purpose
// -------
// Verify the parallel scoring path keeps input order and matches serial
// scoring.
//
// Given
// -----
// - `PARALLEL_THRESHOLD + 7` sawtooth points with one spike, extended
//   tests and normalization off.
//
// Expect
// ------
// - Keys and values in input order.
// - Per-point distances and scores equal to a serial `distance_scores`
//   map over the same summary.
fn parallel_scoring_preserves_order_and_scores() {
    // Arrange
    let n = PARALLEL_THRESHOLD + 7;
    let mut values = sawtooth(n);
    values[n / 2] = 250.0;
    let input = observations(&values);
    let mut opts = DetectionOptions { run_normalization: false, ..DetectionOptions::default() };
    opts.extended.enabled = false;

    // Act
    let out = detect_univariate_statistical(&input, &opts);

    // Assert
    let summary = StatisticalSummary::from_values(&values).unwrap();
    let weights = Weights::default();
    assert_eq!(out.anomalies().len(), n);
    for (i, rec) in out.anomalies().iter().enumerate() {
        let expected = distance_scores(values[i], &summary);
        assert_eq!(rec.key, format!("k{i}"));
        assert_eq!(rec.value, values[i]);
        assert_eq!((rec.sds, rec.mads, rec.iqrs), (expected.sds, expected.mads, expected.iqrs));
        assert_eq!(rec.anomaly_score, weights.score(&expected));
    }
    assert!(out.anomalies()[n / 2].is_anomaly);
}

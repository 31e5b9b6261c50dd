//! detection::classify — sensitivity threshold with an anomaly-share cap.
//!
//! Purpose
//! -------
//! Convert anomaly scores into flags. The base threshold comes from the
//! sensitivity, `t = (100 − sensitivity) / 100`; a cap below 1.0 may raise
//! it to the `(1 − cap)` quantile of the scores so that roughly at most a
//! `cap` share of points is flagged.
//!
//! Invariants & assumptions
//! ------------------------
//! - The threshold only ever rises because of the cap.
//! - Flags use a strict comparison, `score > t`; ties with the quantile are
//!   not flagged.
//! - Parameters are validated by the caller.

use crate::statistics::quantile::quantile;

/// Threshold for `scores` under the given sensitivity and cap.
///
/// Examples
/// --------
/// ```rust
/// use rust_anomaly::detection::classify::anomaly_threshold;
///
/// let scores = [0.0, 0.1, 0.2, 0.9];
/// assert!((anomaly_threshold(&scores, 50.0, 1.0) - 0.5).abs() < 1e-12);
/// assert!(anomaly_threshold(&scores, 95.0, 0.5) > 0.05);
/// ```
pub fn anomaly_threshold(scores: &[f64], sensitivity_score: f64, max_fraction: f64) -> f64 {
    let base = (100.0 - sensitivity_score) / 100.0;
    if max_fraction >= 1.0 || scores.is_empty() {
        return base;
    }
    let capped = quantile(scores, 1.0 - max_fraction);
    if capped > base { capped } else { base }
}

/// Flag every score strictly above `threshold`.
pub fn classify(scores: &[f64], threshold: f64) -> Vec<bool> {
    scores.iter().map(|&s| s > threshold).collect()
}

//! detection::scoring — weighted combination of the distance scores.
//!
//! The anomaly score is `sds·w_sd + mads·w_mad + iqrs·w_iqr`. The default
//! weights sum to 1.05 and are deliberately left unnormalized, so a point
//! that saturates every check scores 1.05.

use serde::Serialize;

use crate::detection::distance::DistanceScores;

/// Weights — per-check multipliers of the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub sds: f64,
    pub mads: f64,
    pub iqrs: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights { sds: 0.25, mads: 0.45, iqrs: 0.35 }
    }
}

impl Weights {
    /// Weighted sum of one point's distance scores.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::detection::distance::DistanceScores;
    /// use rust_anomaly::detection::scoring::Weights;
    ///
    /// let s = DistanceScores { sds: 1.0, mads: 1.0, iqrs: 1.0 };
    /// assert!((Weights::default().score(&s) - 1.05).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn score(&self, scores: &DistanceScores) -> f64 {
        scores.sds * self.sds + scores.mads * self.mads + scores.iqrs * self.iqrs
    }

    /// Sum of the weights (the maximum attainable score).
    pub fn total(&self) -> f64 {
        self.sds + self.mads + self.iqrs
    }
}

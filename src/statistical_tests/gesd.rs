//! statistical_tests::gesd — Rosner's generalized extreme Studentized deviate test.
//!
//! Purpose
//! -------
//! Detect up to `r` outliers in an approximately normal sample (Rosner
//! 1983). Unlike repeated Grubbs tests, GESD fixes the number of candidate
//! removals up front, which keeps the overall type-I error at α and avoids
//! masking by clustered outliers.
//!
//! Key behaviors
//! -------------
//! - For `i = 1..=r`: compute `Rᵢ = max |x − x̄| / s` on the remaining
//!   sample, record the most extreme point, and remove it.
//! - The data are sorted once. The remaining sample is always a contiguous
//!   window of the sorted order, so the most extreme point is one of its
//!   two ends, and running sums of the centered values give `x̄` and `s`
//!   for each step. A full run costs `O(n log n + r)`.
//! - Critical values `λᵢ = (n − i)·t / √((n − i − 1 + t²)(n − i + 1))` with
//!   `t = t_{1 − α/(2(n − i + 1)), n − i − 1}`.
//! - The number of outliers is the largest `i` with `Rᵢ > λᵢ`; the first
//!   that many removed points form the mask.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires `n ≥ 3`, finite data, and `0 < α < 1`.
//! - `r` is clamped to `n − 2` so every t quantile has at least one degree
//!   of freedom. `r = 0` yields an empty mask.
//! - Iteration stops early if the remaining sample becomes constant.
//! - The mask is positional: each removed position is flagged once. When
//!   both ends are equally extreme the earlier position goes first; equal
//!   values leave the low end in position order and the high end in
//!   reverse position order.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::statistical_tests::{
    errors::StatResult,
    grubbs::mean_sd,
    validation::{validate_alpha, validate_sample},
};

/// One removal step of the procedure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesdStep {
    /// Position of the removed point in the original sample.
    pub index: usize,
    /// Value of the removed point.
    pub value: f64,
    /// Test statistic `Rᵢ`.
    pub stat: f64,
    /// Critical value `λᵢ`.
    pub critical: f64,
}

/// GesdOutcome — per-step statistics, outlier count, and per-point mask.
#[derive(Debug, Clone)]
pub struct GesdOutcome {
    steps: Vec<GesdStep>,
    n_outliers: usize,
    mask: Vec<bool>,
}

impl GesdOutcome {
    /// Run GESD on `data` with at most `max_outliers` removals at
    /// significance `alpha`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 3`.
    /// - `InvalidData` / `InvalidAlpha` from input validation.
    pub fn gesd(data: &[f64], max_outliers: usize, alpha: f64) -> StatResult<Self> {
        validate_sample(data, 3)?;
        validate_alpha(alpha)?;
        let n = data.len();
        let r = max_outliers.min(n - 2);

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| data[a].total_cmp(&data[b]).then(a.cmp(&b)));

        // Sums are kept on values centered at the full-sample mean.
        let (center, _) = mean_sd(data);
        let mut sum: f64 = data.iter().map(|x| x - center).sum();
        let mut sum_sq: f64 = data.iter().map(|x| (x - center).powi(2)).sum();
        let (mut lo, mut hi) = (0, n - 1);

        let mut steps = Vec::with_capacity(r);
        for i in 1..=r {
            let (low, high) = (data[order[lo]], data[order[hi]]);
            if low == high {
                break;
            }
            let m = (hi - lo + 1) as f64;
            let mean = center + sum / m;
            let sd = ((sum_sq - sum * sum / m).max(0.0) / (m - 1.0)).sqrt();
            if sd <= 0.0 {
                break;
            }

            let (dev_low, dev_high) = ((mean - low).abs(), (high - mean).abs());
            let take_low = dev_low > dev_high || (dev_low == dev_high && order[lo] < order[hi]);
            let (index, dev) = if take_low {
                lo += 1;
                (order[lo - 1], dev_low)
            } else {
                hi -= 1;
                (order[hi + 1], dev_high)
            };
            let value = data[index];
            sum -= value - center;
            sum_sq -= (value - center).powi(2);
            steps.push(GesdStep { index, value, stat: dev / sd, critical: critical(n, i, alpha) });
        }

        let n_outliers =
            steps.iter().rposition(|s| s.stat > s.critical).map_or(0, |last| last + 1);
        let mut mask = vec![false; n];
        for step in &steps[..n_outliers] {
            mask[step.index] = true;
        }

        Ok(GesdOutcome { steps, n_outliers, mask })
    }

    /// Removal steps actually performed, in order.
    pub fn steps(&self) -> &[GesdStep] {
        &self.steps
    }

    /// Number of points declared outliers.
    pub fn n_outliers(&self) -> usize {
        self.n_outliers
    }

    /// Per-point outlier mask aligned with the input.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Consume the outcome and return the mask.
    pub fn into_mask(self) -> Vec<bool> {
        self.mask
    }
}

fn critical(n: usize, i: usize, alpha: f64) -> f64 {
    let remaining = (n - i + 1) as f64;
    let df = (n - i - 1) as f64;
    let p = 1.0 - alpha / (2.0 * remaining);
    let t = StudentsT::new(0.0, 1.0, df).expect("df ≥ 1 after clamping r").inverse_cdf(p);
    (n - i) as f64 * t / ((df + t * t) * remaining).sqrt()
}

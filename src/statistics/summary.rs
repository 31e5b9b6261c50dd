//! statistics::summary — descriptive statistics snapshot for one dataset.
//!
//! Purpose
//! -------
//! Compute, once per dataset, the location and spread quantities consumed by
//! the distance checks: mean, sample standard deviation, median, scaled MAD,
//! quartiles, IQR, extrema, and count.
//!
//! Invariants & assumptions
//! ------------------------
//! - `sd` is the *sample* standard deviation (divisor `n − 1`) and is `0.0`
//!   when `count < 2`.
//! - `mad` is scaled by `1 / 0.6745` (see
//!   [`MAD_NORMAL_CONSISTENCY`](super::quantile::MAD_NORMAL_CONSISTENCY)).
//! - `p25`, `p75`, and `median` use linear interpolation.
//! - The snapshot is immutable; a normalized copy of the data gets its own
//!   snapshot.

use serde::Serialize;

use crate::{
    statistical_tests::{errors::StatResult, validation::validate_sample},
    statistics::quantile::{median_absolute_deviation, median_sorted, quantile_sorted, sorted_copy},
};

/// StatisticalSummary — immutable descriptive statistics of a sample.
///
/// Fields
/// ------
/// - `count`: number of observations.
/// - `mean`, `sd`: arithmetic mean and sample standard deviation.
/// - `median`, `mad`: median and scaled median absolute deviation.
/// - `p25`, `p75`, `iqr`: quartiles and `p75 − p25`.
/// - `min`, `max`: extrema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticalSummary {
    pub count: usize,
    pub mean: f64,
    pub sd: f64,
    pub median: f64,
    pub mad: f64,
    pub p25: f64,
    pub p75: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
}

impl StatisticalSummary {
    /// Compute the summary of `values`.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InsufficientData` for an empty slice.
    /// - `StatTestError::InvalidData` if any value is non-finite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::statistics::StatisticalSummary;
    ///
    /// let s = StatisticalSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// assert_eq!(s.count, 5);
    /// assert_eq!(s.median, 3.0);
    /// assert_eq!(s.iqr, 2.0);
    /// ```
    pub fn from_values(values: &[f64]) -> StatResult<Self> {
        validate_sample(values, 1)?;
        let sorted = sorted_copy(values);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let sd = sample_sd(&sorted, mean);
        let median = median_sorted(&sorted);
        let mad = median_absolute_deviation(&sorted, median);
        let p25 = quantile_sorted(&sorted, 0.25);
        let p75 = quantile_sorted(&sorted, 0.75);

        Ok(StatisticalSummary {
            count,
            mean,
            sd,
            median,
            mad,
            p25,
            p75,
            iqr: p75 - p25,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }

    /// `true` when the sample has spread (`min < max`).
    #[inline]
    pub fn has_variance(&self) -> bool {
        self.min < self.max
    }
}

#[inline]
fn sample_sd(data: &[f64], mean: f64) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let ss: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

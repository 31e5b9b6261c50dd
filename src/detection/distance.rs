//! detection::distance — per-point distance checks against a summary.
//!
//! Purpose
//! -------
//! Turn each value into three scores in `[0, 1]` measuring how far it sits
//! from the centre of the data relative to a spread estimate: standard
//! deviations from the mean, scaled MADs from the median, and IQRs beyond
//! the quartiles.
//!
//! Key behaviors
//! -------------
//! - [`check_stat`] is the shared kernel: the distance from `midpoint` as a
//!   fraction of `n · distance`, saturating at `1.0`.
//! - [`check_iqr`] is asymmetric. Values below the median are measured from
//!   `p25`, the rest from `p75`; anything inside the box scores `0.0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A zero spread never divides: a value off the midpoint scores `1.0`, a
//!   value on it scores `0.0`.
//! - Scores are monotone non-decreasing in `|value − midpoint|`.
//!
//! Conventions
//! -----------
//! - Multipliers are [`SD_MULTIPLIER`] (3), [`MAD_MULTIPLIER`] (3), and
//!   [`IQR_MULTIPLIER`] (1.5).

use serde::Serialize;

use crate::statistics::StatisticalSummary;

/// Number of standard deviations at which the SD check saturates.
pub const SD_MULTIPLIER: f64 = 3.0;
/// Number of scaled MADs at which the MAD check saturates.
pub const MAD_MULTIPLIER: f64 = 3.0;
/// Number of IQRs beyond a quartile at which the IQR check saturates.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Fractional distance of `value` from `midpoint` in units of `n · distance`.
///
/// Returns
/// -------
/// - `1.0` / `0.0` when `distance == 0` and `value` is off / on `midpoint`.
/// - `|value − midpoint| / (n · distance)` when that ratio is below one.
/// - `1.0` otherwise.
///
/// Examples
/// --------
/// ```rust
/// use rust_anomaly::detection::distance::check_stat;
///
/// assert_eq!(check_stat(13.0, 10.0, 2.0, 3.0), 0.5);
/// assert_eq!(check_stat(30.0, 10.0, 2.0, 3.0), 1.0);
/// assert_eq!(check_stat(4.0, 4.0, 0.0, 3.0), 0.0);
/// ```
#[inline]
pub fn check_stat(value: f64, midpoint: f64, distance: f64, n: f64) -> f64 {
    let gap = (value - midpoint).abs();
    if distance == 0.0 {
        return if gap > 0.0 { 1.0 } else { 0.0 };
    }
    let limit = n * distance;
    if gap < limit { gap / limit } else { 1.0 }
}

/// Distance from the mean in units of `n` standard deviations.
#[inline]
pub fn check_sd(value: f64, mean: f64, sd: f64, n: f64) -> f64 {
    check_stat(value, mean, sd, n)
}

/// Distance from the median in units of `n` scaled MADs.
#[inline]
pub fn check_mad(value: f64, median: f64, mad: f64, n: f64) -> f64 {
    check_stat(value, median, mad, n)
}

/// Distance beyond the nearer quartile in units of `n` IQRs.
///
/// Values strictly below the median are compared against `p25` and score
/// only when below it; all others are compared against `p75` and score only
/// when above it.
#[inline]
pub fn check_iqr(value: f64, median: f64, p25: f64, p75: f64, iqr: f64, n: f64) -> f64 {
    if value < median {
        if value < p25 { check_stat(value, p25, iqr, n) } else { 0.0 }
    } else if value > p75 {
        check_stat(value, p75, iqr, n)
    } else {
        0.0
    }
}

/// DistanceScores — the three check results for one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceScores {
    pub sds: f64,
    pub mads: f64,
    pub iqrs: f64,
}

/// Run all three checks for `value` with the default multipliers.
pub fn distance_scores(value: f64, summary: &StatisticalSummary) -> DistanceScores {
    DistanceScores {
        sds: check_sd(value, summary.mean, summary.sd, SD_MULTIPLIER),
        mads: check_mad(value, summary.median, summary.mad, MAD_MULTIPLIER),
        iqrs: check_iqr(
            value,
            summary.median,
            summary.p25,
            summary.p75,
            summary.iqr,
            IQR_MULTIPLIER,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The three regimes of `check_stat`, including zero spread.
    // - The asymmetric quartile handling of `check_iqr`.
    // - `distance_scores` wiring against a concrete summary.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the proportional, saturated, and zero-spread regimes.
    //
    // Given
    // -----
    // - Midpoint 10, distance 2, n = 3 (limit 6).
    //
    // Expect
    // ------
    // - 13 → 0.5, 4 → 1.0, 16 → 1.0 (boundary saturates), 10 → 0.
    // - With zero distance: 10 → 0, 10.001 → 1.
    fn check_stat_regimes() {
        assert_relative_eq!(check_stat(13.0, 10.0, 2.0, 3.0), 0.5);
        assert_eq!(check_stat(4.0, 10.0, 2.0, 3.0), 1.0);
        assert_eq!(check_stat(16.0, 10.0, 2.0, 3.0), 1.0);
        assert_eq!(check_stat(10.0, 10.0, 2.0, 3.0), 0.0);
        assert_eq!(check_stat(10.0, 10.0, 0.0, 3.0), 0.0);
        assert_eq!(check_stat(10.001, 10.0, 0.0, 3.0), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Check that the IQR check is zero inside the box and measured from the
    // nearer quartile outside it.
    //
    // Given
    // -----
    // - median 5, p25 3, p75 7, iqr 4, n = 1.5 (limit 6).
    //
    // Expect
    // ------
    // - 4 and 6 → 0; 0 → 3/6; 10 → 3/6; 20 → 1.
    fn check_iqr_is_asymmetric_around_median() {
        assert_eq!(check_iqr(4.0, 5.0, 3.0, 7.0, 4.0, 1.5), 0.0);
        assert_eq!(check_iqr(6.0, 5.0, 3.0, 7.0, 4.0, 1.5), 0.0);
        assert_relative_eq!(check_iqr(0.0, 5.0, 3.0, 7.0, 4.0, 1.5), 0.5);
        assert_relative_eq!(check_iqr(10.0, 5.0, 3.0, 7.0, 4.0, 1.5), 0.5);
        assert_eq!(check_iqr(20.0, 5.0, 3.0, 7.0, 4.0, 1.5), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero IQR flags everything outside the (collapsed) box fully.
    //
    // Given
    // -----
    // - median = p25 = p75 = 2, iqr 0.
    //
    // Expect
    // ------
    // - 2 → 0; 1 and 3 → 1.
    fn check_iqr_zero_spread() {
        assert_eq!(check_iqr(2.0, 2.0, 2.0, 2.0, 0.0, 1.5), 0.0);
        assert_eq!(check_iqr(1.0, 2.0, 2.0, 2.0, 0.0, 1.5), 1.0);
        assert_eq!(check_iqr(3.0, 2.0, 2.0, 2.0, 0.0, 1.5), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify `distance_scores` uses the summary fields and multipliers.
    //
    // Given
    // -----
    // - Summary of [1, 2, 3, 4, 5] and value 9.
    //
    // Expect
    // ------
    // - sds = 6/(3·sd), mads = 6/(3·mad), iqrs = 5/(1.5·2) capped to 1.
    fn distance_scores_uses_summary() {
        // Arrange
        let s = StatisticalSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        // Act
        let scores = distance_scores(9.0, &s);

        // Assert
        let expected_sds = (6.0 / (3.0 * s.sd)).min(1.0);
        let expected_mads = (6.0 / (3.0 * s.mad)).min(1.0);
        assert_relative_eq!(scores.sds, expected_sds, epsilon = 1e-12);
        assert_relative_eq!(scores.mads, expected_mads, epsilon = 1e-12);
        assert_eq!(scores.iqrs, 1.0);
    }
}

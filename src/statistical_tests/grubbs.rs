//! statistical_tests::grubbs — two-sided Grubbs test for a single outlier.
//!
//! Purpose
//! -------
//! Detect the single most extreme observation of an approximately normal
//! sample (Grubbs 1969) and express the result as a per-point mask.
//!
//! Key behaviors
//! -------------
//! - Statistic `G = maxᵢ |xᵢ − x̄| / s` with the sample standard deviation.
//! - Critical value `G_crit = (n − 1)/√n · √(t² / (n − 2 + t²))` where `t`
//!   is the upper `α/(2n)` quantile of Student's t with `n − 2` degrees of
//!   freedom.
//! - The mask is the set difference between the original sample and the
//!   outlier-removed sample: every position whose value equals the removed
//!   value is flagged.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires `n ≥ 3`, finite data, and `0 < α < 1`.
//! - A constant sample is rejected with `StatTestError::ZeroVariance`.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::statistical_tests::{
    errors::{StatResult, StatTestError},
    validation::{validate_alpha, validate_sample},
};

/// GrubbsOutcome — statistic, critical value, and per-point mask.
#[derive(Debug, Clone)]
pub struct GrubbsOutcome {
    stat: f64,
    critical: f64,
    outlier: Option<f64>,
    mask: Vec<bool>,
}

impl GrubbsOutcome {
    /// Run the two-sided Grubbs test at significance `alpha`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 3`.
    /// - `InvalidData` / `InvalidAlpha` from input validation.
    /// - `ZeroVariance` when all values are identical.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::statistical_tests::grubbs::GrubbsOutcome;
    ///
    /// let data = [9.8, 10.1, 10.0, 9.9, 10.2, 10.0, 9.9, 25.0];
    /// let out = GrubbsOutcome::grubbs(&data, 0.05).unwrap();
    /// assert_eq!(out.outlier(), Some(25.0));
    /// assert_eq!(out.mask().iter().filter(|&&m| m).count(), 1);
    /// ```
    pub fn grubbs(data: &[f64], alpha: f64) -> StatResult<Self> {
        validate_sample(data, 3)?;
        validate_alpha(alpha)?;
        let (mean, sd) = mean_sd(data);
        if sd <= 0.0 {
            return Err(StatTestError::ZeroVariance);
        }

        let (idx, dev) = most_extreme(data.iter().copied(), mean);
        let stat = dev / sd;
        let critical = grubbs_critical(data.len(), alpha);
        let outlier = (stat > critical).then(|| data[idx]);
        let mask = match outlier {
            Some(value) => mask_by_values(data, &[value]),
            None => vec![false; data.len()],
        };

        Ok(GrubbsOutcome { stat, critical, outlier, mask })
    }

    /// Grubbs statistic `G`.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Critical value `G_crit` at the requested α.
    pub fn critical(&self) -> f64 {
        self.critical
    }

    /// Value removed as an outlier, if any.
    pub fn outlier(&self) -> Option<f64> {
        self.outlier
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

/// Two-sided Grubbs critical value for `n` points at significance `alpha`.
///
/// Shared with the generalized ESD procedure, which evaluates it on the
/// shrinking remaining sample.
pub(crate) fn grubbs_critical(n: usize, alpha: f64) -> f64 {
    let nf = n as f64;
    let df = nf - 2.0;
    let t = StudentsT::new(0.0, 1.0, df)
        .expect("n ≥ 3 gives positive degrees of freedom")
        .inverse_cdf(1.0 - alpha / (2.0 * nf));
    let t2 = t * t;
    (nf - 1.0) / nf.sqrt() * (t2 / (df + t2)).sqrt()
}

/// Mean and sample standard deviation.
pub(crate) fn mean_sd(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let ss: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    (mean, (ss / (n - 1.0)).sqrt())
}

/// Position and absolute deviation of the value farthest from `center`.
///
/// Ties resolve to the first position.
pub(crate) fn most_extreme(values: impl Iterator<Item = f64>, center: f64) -> (usize, f64) {
    values
        .map(|v| (v - center).abs())
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, d)| if d > best.1 { (i, d) } else { best })
}

/// Flag every position of `data` whose value appears in `removed`.
pub(crate) fn mask_by_values(data: &[f64], removed: &[f64]) -> Vec<bool> {
    data.iter().map(|v| removed.contains(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Detection of a single gross outlier and the value-based mask.
    // - No detection on tightly clustered data.
    // - The critical value against a tabulated reference.
    // - Validation guards.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that duplicates of the removed value are flagged too
    // (set-difference semantics).
    //
    // Given
    // -----
    // - Tight cluster around 10 with two copies of 40 among 20 points.
    //
    // Expect
    // ------
    // - Outlier value 40; both copies flagged.
    fn grubbs_mask_flags_all_copies_of_removed_value() {
        // Arrange
        let mut data: Vec<f64> =
            (0..18).map(|i| 10.0 + 0.1 * ((i % 5) as f64 - 2.0)).collect();
        data.insert(3, 40.0);
        data.push(40.0);

        // Act
        let out = GrubbsOutcome::grubbs(&data, 0.05).unwrap();

        // Assert
        assert_relative_eq!(out.outlier().unwrap(), 40.0);
        assert!(out.stat() > out.critical());
        assert!(out.mask()[3] && out.mask()[19]);
        assert_eq!(out.mask().iter().filter(|&&m| m).count(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Verify that evenly spaced data yields no outlier.
    //
    // Given
    // -----
    // - 1..=10.
    //
    // Expect
    // ------
    // - `outlier() == None`, G < G_crit.
    fn grubbs_evenly_spaced_has_no_outlier() {
        // Arrange
        let data: Vec<f64> = (1..=10).map(f64::from).collect();

        // Act
        let out = GrubbsOutcome::grubbs(&data, 0.05).unwrap();

        // Assert
        assert!(out.outlier().is_none());
        assert!(out.stat() < out.critical());
    }

    #[test]
    // Purpose
    // -------
    // Check the critical value against the standard Grubbs table.
    //
    // Given
    // -----
    // - n = 10, α = 0.05 (two-sided), tabulated G_crit ≈ 2.290.
    //
    // Expect
    // ------
    // - Agreement to about 1e-2.
    fn grubbs_critical_matches_table() {
        // Arrange / Act
        let g = grubbs_critical(10, 0.05);

        // Assert
        assert_relative_eq!(g, 2.290, epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure guards fire for constant data and an invalid α.
    //
    // Given
    // -----
    // - Constant sample; valid sample with α = 0.
    //
    // Expect
    // ------
    // - `ZeroVariance` and `InvalidAlpha`.
    fn grubbs_guards_return_errors() {
        // Arrange
        let constant = [2.0; 5];
        let data = [1.0, 2.0, 3.0];

        // Act / Assert
        assert!(matches!(GrubbsOutcome::grubbs(&constant, 0.05), Err(StatTestError::ZeroVariance)));
        assert!(matches!(GrubbsOutcome::grubbs(&data, 0.0), Err(StatTestError::InvalidAlpha(_))));
    }
}

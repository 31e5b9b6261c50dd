//! statistical_tests::anderson_darling — Anderson–Darling test for normality.
//!
//! Purpose
//! -------
//! Compute the Anderson–Darling A² statistic of a sample against a normal
//! distribution with estimated mean and (sample) standard deviation, and
//! compare it to Stephens' (1974) critical values at five significance
//! levels.
//!
//! Conventions
//! -----------
//! - `A² = −n − (1/n) Σᵢ (2i − 1)·[ln Φ(zᵢ) + ln(1 − Φ(zₙ₊₁₋ᵢ))]` over the
//!   sorted standardized values zᵢ.
//! - Critical values are `[0.576, 0.656, 0.787, 0.918, 1.092]` divided by
//!   `1 + 4/n − 25/n²`, at significance levels `[15, 10, 5, 2.5, 1] %`.
//! - Φ is clamped away from 0 and 1 before taking logarithms.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::statistical_tests::{
    errors::{StatResult, StatTestError},
    validation::validate_sample,
};
use crate::statistics::quantile::sorted_copy;

/// Significance levels, in percent, matching [`BASE_CRITICAL_VALUES`].
pub const SIGNIFICANCE_LEVELS: [f64; 5] = [15.0, 10.0, 5.0, 2.5, 1.0];

/// Asymptotic critical values for the normal case with estimated parameters.
pub const BASE_CRITICAL_VALUES: [f64; 5] = [0.576, 0.656, 0.787, 0.918, 1.092];

const PHI_CLAMP: f64 = 1e-15;

/// ADOutcome — A² statistic with its sample-size adjusted critical values.
#[derive(Debug, Clone)]
pub struct ADOutcome {
    stat: f64,
    critical_values: [f64; 5],
}

impl ADOutcome {
    /// Run the Anderson–Darling normality test on `data`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 3`.
    /// - `InvalidData` for non-finite values.
    /// - `ZeroVariance` when the sample standard deviation is zero.
    pub fn anderson_darling(data: &[f64]) -> StatResult<Self> {
        validate_sample(data, 3)?;
        let x = sorted_copy(data);
        let n = x.len();
        let nf = n as f64;
        let mean = x.iter().sum::<f64>() / nf;
        let sd = (x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0)).sqrt();
        if sd <= 0.0 {
            return Err(StatTestError::ZeroVariance);
        }

        let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
        let s: f64 = (0..n)
            .map(|i| {
                let lower = normal.cdf((x[i] - mean) / sd).clamp(PHI_CLAMP, 1.0 - PHI_CLAMP);
                let upper =
                    normal.sf((x[n - 1 - i] - mean) / sd).clamp(PHI_CLAMP, 1.0 - PHI_CLAMP);
                (2 * i + 1) as f64 * (lower.ln() + upper.ln())
            })
            .sum();
        let stat = -nf - s / nf;

        let adjust = 1.0 + 4.0 / nf - 25.0 / (nf * nf);
        let critical_values = BASE_CRITICAL_VALUES.map(|cv| cv / adjust);

        Ok(ADOutcome { stat, critical_values })
    }

    /// The A² statistic.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Critical values aligned with [`SIGNIFICANCE_LEVELS`].
    pub fn critical_values(&self) -> &[f64; 5] {
        &self.critical_values
    }

    /// `(significance %, critical value, statistic below critical value)`
    /// for each level.
    pub fn levels(&self) -> impl Iterator<Item = (f64, f64, bool)> + '_ {
        SIGNIFICANCE_LEVELS
            .iter()
            .zip(self.critical_values.iter())
            .map(|(&sl, &cv)| (sl, cv, self.stat < cv))
    }

    /// `true` iff the statistic is below the critical value at every level.
    pub fn passes_all_levels(&self) -> bool {
        self.levels().all(|(_, _, below)| below)
    }
}

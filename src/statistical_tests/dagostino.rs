//! statistical_tests::dagostino — D'Agostino–Pearson K² omnibus test.
//!
//! Purpose
//! -------
//! Test the null hypothesis that a sample comes from a normal distribution
//! by combining standardized skewness and kurtosis statistics
//! (D'Agostino 1970; Anscombe & Glynn 1983; D'Agostino & Pearson 1973).
//!
//! Key behaviors
//! -------------
//! - Transform the sample skewness √b₁ into an approximately standard
//!   normal `Z_s` (D'Agostino's Johnson-S_U transform).
//! - Transform the sample kurtosis b₂ into an approximately standard normal
//!   `Z_k` (Anscombe–Glynn).
//! - Report `K² = Z_s² + Z_k²` and its χ²(2) upper-tail p-value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires `n ≥ 8`; the kurtosis approximation is poor below that.
//! - Moments are the biased (divisor n) central moments.
//! - A constant sample is rejected with `StatTestError::ZeroVariance`.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::statistical_tests::{
    errors::{StatResult, StatTestError},
    validation::validate_sample,
};

/// Smallest sample size accepted by the K² test.
pub const DAGOSTINO_MIN_N: usize = 8;

/// K2Outcome — outcome of the D'Agostino–Pearson omnibus test.
#[derive(Debug, Copy, Clone)]
pub struct K2Outcome {
    z_skew: f64,
    z_kurt: f64,
    stat: f64,
    p_value: f64,
}

impl K2Outcome {
    /// Run the K² test on `data`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 8`.
    /// - `InvalidData` for non-finite values.
    /// - `ZeroVariance` when the second central moment is zero.
    /// - `NonFiniteStatistic` when the kurtosis transform degenerates.
    pub fn dagostino_pearson(data: &[f64]) -> StatResult<Self> {
        validate_sample(data, DAGOSTINO_MIN_N)?;
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let (m2, m3, m4) = central_moments(data, mean);
        if m2 <= 0.0 {
            return Err(StatTestError::ZeroVariance);
        }

        let z_skew = skew_z(m3 / m2.powf(1.5), n);
        let z_kurt = kurtosis_z(m4 / (m2 * m2), n);
        if !z_skew.is_finite() || !z_kurt.is_finite() {
            return Err(StatTestError::NonFiniteStatistic("D'Agostino K^2"));
        }
        let stat = z_skew * z_skew + z_kurt * z_kurt;
        let p_value = ChiSquared::new(2.0).expect("freedom = 2").sf(stat);

        Ok(K2Outcome { z_skew, z_kurt, stat, p_value })
    }

    /// Standardized skewness statistic `Z_s`.
    pub fn z_skew(&self) -> f64 {
        self.z_skew
    }

    /// Standardized kurtosis statistic `Z_k`.
    pub fn z_kurt(&self) -> f64 {
        self.z_kurt
    }

    /// Omnibus statistic `K² = Z_s² + Z_k²`.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// χ²(2) upper-tail p-value of [`stat`](Self::stat).
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

//
// ---------- Private helpers ----------
//

fn central_moments(data: &[f64], mean: f64) -> (f64, f64, f64) {
    let n = data.len() as f64;
    let (s2, s3, s4) = data.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), &x| {
        let d = x - mean;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    });
    (s2 / n, s3 / n, s4 / n)
}

/// D'Agostino (1970) transform of √b₁.
fn skew_z(b1: f64, n: f64) -> f64 {
    let mut y = b1 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    if y == 0.0 {
        y = 1.0;
    }
    let r = y / alpha;
    delta * (r + (r * r + 1.0).sqrt()).ln()
}

/// Anscombe & Glynn (1983) transform of b₂.
fn kurtosis_z(b2: f64, n: f64) -> f64 {
    let e = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 =
        24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0).powi(2) * (n + 3.0) * (n + 5.0));
    let x = (b2 - e) / var_b2.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}

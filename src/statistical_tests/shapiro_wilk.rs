//! statistical_tests::shapiro_wilk — Shapiro–Wilk W test for normality.
//!
//! Purpose
//! -------
//! Implement the Shapiro–Wilk test using Royston's (1992, 1995; AS R94)
//! polynomial approximations for the coefficients and for the null
//! distribution of W.
//!
//! Key behaviors
//! -------------
//! - Approximate expected normal order statistics with Blom scores
//!   mᵢ = Φ⁻¹((i − 0.375) / (n + 0.25)).
//! - Correct the two most extreme coefficients with Royston's polynomials
//!   in `1/√n`.
//! - Transform `ln(1 − W)` to an approximately standard normal z and report
//!   the upper-tail p-value.
//!
//! Invariants & assumptions
//! ------------------------
//! - Supported sample sizes are `3 ≤ n ≤ 5000`.
//! - n = 3 uses the exact distribution `p = 1 − (6/π)·acos(√W)`.
//! - A constant sample is rejected with `StatTestError::ZeroVariance`.
//!
//! Testing notes
//! -------------
//! - Unit tests check that symmetric, bell-shaped data yields W close to 1
//!   and a large p-value, that heavily skewed data is rejected, and that the
//!   sample-size and zero-variance guards fire.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::statistical_tests::{
    errors::{StatResult, StatTestError},
    validation::validate_sample,
};
use crate::statistics::quantile::sorted_copy;

/// Largest sample size covered by Royston's approximation.
pub const SHAPIRO_MAX_N: usize = 5000;

// Royston polynomial coefficients (AS R94).
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// SWOutcome — W statistic and p-value of a Shapiro–Wilk test.
#[derive(Debug, Copy, Clone)]
pub struct SWOutcome {
    w: f64,
    p_value: f64,
}

impl SWOutcome {
    /// Run the Shapiro–Wilk test on `data`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 3`.
    /// - `SampleTooLarge` when `n > 5000`.
    /// - `InvalidData` for non-finite values.
    /// - `ZeroVariance` when all values are identical.
    /// - `NonFiniteStatistic` if the coefficient normalization degenerates.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::statistical_tests::shapiro_wilk::SWOutcome;
    ///
    /// let data = [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
    /// let out = SWOutcome::shapiro_wilk(&data).unwrap();
    /// assert!(out.w() > 0.9);
    /// assert!(out.p_value() > 0.05);
    /// ```
    pub fn shapiro_wilk(data: &[f64]) -> StatResult<Self> {
        validate_sample(data, 3)?;
        let n = data.len();
        if n > SHAPIRO_MAX_N {
            return Err(StatTestError::SampleTooLarge { max: SHAPIRO_MAX_N, found: n });
        }
        let x = sorted_copy(data);
        if x[n - 1] - x[0] <= 0.0 {
            return Err(StatTestError::ZeroVariance);
        }

        if n == 3 {
            return Ok(exact_n3(&x));
        }

        let half = n / 2;
        let a = coefficients(n, half)?;
        let w = statistic(&x, &a, half).min(1.0);
        if !w.is_finite() {
            return Err(StatTestError::NonFiniteStatistic("Shapiro-Wilk W"));
        }
        let p_value = p_value(w, n).clamp(0.0, 1.0);
        Ok(SWOutcome { w, p_value })
    }

    /// The W statistic, in (0, 1].
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Upper-tail p-value of W under normality.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

//
// ---------- Private helpers ----------
//

fn exact_n3(x: &[f64]) -> SWOutcome {
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let num = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (num * num / ss).clamp(0.75, 1.0);
    let p_value = (1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos()).clamp(0.0, 1.0);
    SWOutcome { w, p_value }
}

/// Horner evaluation of c[0] + c[1]·x + c[2]·x² + …
#[inline]
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

#[inline]
fn std_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("standard normal parameters are valid")
}

/// Antisymmetric coefficients a₁ … a_{n/2} for the lower half of the sample.
///
/// Blom scores are negative in the lower half, so aᵢ is positive after the
/// sign flip and pairs with `x₍ₙ₋ᵢ₎ − x₍ᵢ₎`.
fn coefficients(n: usize, half: usize) -> StatResult<Vec<f64>> {
    let normal = std_normal();
    let nf = n as f64;
    let m: Vec<f64> = (0..half)
        .map(|i| normal.inverse_cdf((i as f64 + 1.0 - 0.375) / (nf + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let mut a = vec![0.0; half];

    let (fac_sq, one_minus, corrected) = if n <= 5 {
        (summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1, 1)
    } else {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        (
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
            2,
        )
    };
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(StatTestError::NonFiniteStatistic("Shapiro-Wilk coefficient"));
    }
    let fac = (fac_sq / one_minus).sqrt();
    a[0] = a1;
    for i in corrected..half {
        a[i] = -m[i] / fac;
    }
    Ok(a)
}

fn statistic(x: &[f64], a: &[f64], half: usize) -> f64 {
    let n = x.len();
    let sa: f64 = (0..half).map(|i| a[i] * (x[n - 1 - i] - x[i])).sum();
    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    (sa * sa) / ss
}

fn p_value(w: f64, n: usize) -> f64 {
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let nf = n as f64;
    let normal = std_normal();

    if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let m = poly(&C3, nf);
        let s = poly(&C4, nf).exp();
        normal.sf((y2 - m) / s)
    } else {
        let ln_n = nf.ln();
        let m = poly(&C5, ln_n);
        let s = poly(&C6, ln_n).exp();
        normal.sf((y - m) / s)
    }
}

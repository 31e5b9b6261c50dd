//! statistics::quantile — order statistics with linear interpolation.
//!
//! Purpose
//! -------
//! Provide the sorting, quantile, median, and median-absolute-deviation
//! primitives shared by the statistical summary, the classifier's cap
//! enforcement, and the normality tests.
//!
//! Conventions
//! -----------
//! - Quantiles use the "linear" method: for sorted values x₍₀₎ ≤ … ≤ x₍ₙ₋₁₎
//!   and probability `q`, the position is `h = q·(n − 1)` and the result is
//!   `x₍⌊h⌋₎ + (h − ⌊h⌋)·(x₍⌊h⌋+1₎ − x₍⌊h⌋₎)`.
//! - `q` is clamped to `[0, 1]`; callers never receive an interpolation
//!   outside the sample range.
//! - Sorting uses `f64::total_cmp`, so NaN inputs order deterministically
//!   instead of panicking.

/// Consistency constant dividing the raw MAD so that it estimates σ for
/// normal data (`1 / 0.6745 ≈ 1.4826`).
pub const MAD_NORMAL_CONSISTENCY: f64 = 0.6745;

/// Return an ascending copy of `data`.
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolation quantile of already-sorted data.
///
/// Returns `NaN` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let h = q * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Linear-interpolation quantile of unsorted data.
pub fn quantile(data: &[f64], q: f64) -> f64 {
    quantile_sorted(&sorted_copy(data), q)
}

/// Median of already-sorted data.
#[inline]
pub fn median_sorted(sorted: &[f64]) -> f64 {
    quantile_sorted(sorted, 0.5)
}

/// Median of unsorted data.
pub fn median(data: &[f64]) -> f64 {
    median_sorted(&sorted_copy(data))
}

/// Scaled median absolute deviation around `center`.
///
/// Computes `median(|xᵢ − center|) / 0.6745`. Returns `0.0` for an empty
/// slice so that downstream distance checks fall into their zero-spread
/// branch rather than propagating NaN.
pub fn median_absolute_deviation(data: &[f64], center: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let deviations: Vec<f64> = data.iter().map(|x| (x - center).abs()).collect();
    median(&deviations) / MAD_NORMAL_CONSISTENCY
}

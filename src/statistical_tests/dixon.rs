//! statistical_tests::dixon — Dixon's Q test for a single extreme value.
//!
//! Purpose
//! -------
//! Test whether the smallest or largest observation of a small sample
//! (3 ≤ n ≤ 30) is an outlier using the gap-over-range ratio
//! `Q = gap / range` and tabulated critical values (Rorabacher 1991).
//!
//! Key behaviors
//! -------------
//! - `Q_min = (x₍₂₎ − x₍₁₎)/range`, `Q_max = (x₍ₙ₎ − x₍ₙ₋₁₎)/range`.
//! - An extreme is flagged when its ratio exceeds the critical value. When
//!   both exceed it by exactly the same amount both extremes are flagged;
//!   otherwise only the larger excess wins.
//! - A zero range yields `Q = 0` on both sides and no flag.
//! - The mask flags every position whose value equals a flagged extreme.
//!
//! Conventions
//! -----------
//! - Critical values are tabulated at 90 %, 95 %, and 99 % confidence for
//!   n = 3..=30; [`DixonConfidence::NinetyFive`] is the default.

use serde::Serialize;

use crate::statistical_tests::{
    errors::{StatResult, StatTestError},
    grubbs::mask_by_values,
    validation::validate_sample,
};
use crate::statistics::quantile::sorted_copy;

/// Smallest sample size covered by the Q tables.
pub const DIXON_MIN_N: usize = 3;
/// Largest sample size covered by the Q tables.
pub const DIXON_MAX_N: usize = 30;

const Q90: [f64; 28] = [
    0.941, 0.765, 0.642, 0.56, 0.507, 0.468, 0.437, 0.412, 0.392, 0.376, 0.361, 0.349, 0.338, 0.329,
    0.32, 0.313, 0.306, 0.3, 0.295, 0.29, 0.285, 0.281, 0.277, 0.273, 0.269, 0.266, 0.263, 0.26,
];
const Q95: [f64; 28] = [
    0.97, 0.829, 0.71, 0.625, 0.568, 0.526, 0.493, 0.466, 0.444, 0.426, 0.41, 0.396, 0.384, 0.374,
    0.365, 0.356, 0.349, 0.342, 0.337, 0.331, 0.326, 0.321, 0.317, 0.312, 0.308, 0.305, 0.301, 0.29,
];
const Q99: [f64; 28] = [
    0.994, 0.926, 0.821, 0.74, 0.68, 0.634, 0.598, 0.568, 0.542, 0.522, 0.503, 0.488, 0.475, 0.463,
    0.452, 0.442, 0.433, 0.425, 0.418, 0.411, 0.404, 0.399, 0.393, 0.388, 0.384, 0.38, 0.376, 0.372,
];

/// Confidence level of the Q table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DixonConfidence {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
}

impl DixonConfidence {
    /// Critical Q for a sample of `n` points, `None` outside 3..=30.
    pub fn critical(self, n: usize) -> Option<f64> {
        if !(DIXON_MIN_N..=DIXON_MAX_N).contains(&n) {
            return None;
        }
        let table = match self {
            DixonConfidence::Ninety => &Q90,
            DixonConfidence::NinetyFive => &Q95,
            DixonConfidence::NinetyNine => &Q99,
        };
        Some(table[n - DIXON_MIN_N])
    }
}

/// Which extreme(s) Dixon's test flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DixonFlag {
    None,
    Low,
    High,
    Both,
}

/// DixonOutcome — gap ratios, critical value, and per-point mask.
#[derive(Debug, Clone)]
pub struct DixonOutcome {
    q_min: f64,
    q_max: f64,
    critical: f64,
    flag: DixonFlag,
    mask: Vec<bool>,
}

impl DixonOutcome {
    /// Run Dixon's Q test on `data` at the given confidence.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` when `n < 3`.
    /// - `SampleTooLarge` when `n > 30`.
    /// - `InvalidData` for non-finite values.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::statistical_tests::dixon::{DixonConfidence, DixonFlag, DixonOutcome};
    ///
    /// let data = [2.0, -40.0, 1.0, 3.0, 4.0];
    /// let out = DixonOutcome::dixon(&data, DixonConfidence::NinetyFive).unwrap();
    /// assert_eq!(out.flag(), DixonFlag::Low);
    /// assert!(out.mask()[1]);
    /// ```
    pub fn dixon(data: &[f64], confidence: DixonConfidence) -> StatResult<Self> {
        validate_sample(data, DIXON_MIN_N)?;
        let n = data.len();
        let critical = confidence
            .critical(n)
            .ok_or(StatTestError::SampleTooLarge { max: DIXON_MAX_N, found: n })?;

        let x = sorted_copy(data);
        let range = x[n - 1] - x[0];
        let (q_min, q_max) = if range > 0.0 {
            ((x[1] - x[0]) / range, (x[n - 1] - x[n - 2]) / range)
        } else {
            (0.0, 0.0)
        };

        let low = q_min - critical;
        let high = q_max - critical;
        let flag = if low <= 0.0 && high <= 0.0 {
            DixonFlag::None
        } else if low == high {
            DixonFlag::Both
        } else if low > high {
            DixonFlag::Low
        } else {
            DixonFlag::High
        };

        let removed: Vec<f64> = match flag {
            DixonFlag::None => Vec::new(),
            DixonFlag::Low => vec![x[0]],
            DixonFlag::High => vec![x[n - 1]],
            DixonFlag::Both => vec![x[0], x[n - 1]],
        };
        let mask = mask_by_values(data, &removed);

        Ok(DixonOutcome { q_min, q_max, critical, flag, mask })
    }

    /// Gap ratio of the smallest value.
    pub fn q_min(&self) -> f64 {
        self.q_min
    }

    /// Gap ratio of the largest value.
    pub fn q_max(&self) -> f64 {
        self.q_max
    }

    /// Tabulated critical Q.
    pub fn critical(&self) -> f64 {
        self.critical
    }

    /// Which extreme(s) were flagged.
    pub fn flag(&self) -> DixonFlag {
        self.flag
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

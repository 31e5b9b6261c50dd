//! statistics — descriptive statistics shared by every detector.
//!
//! Purpose
//! -------
//! Provide the order-statistic primitives ([`quantile`]) and the immutable
//! [`StatisticalSummary`] snapshot computed once per dataset.
//!
//! Conventions
//! -----------
//! - Linear-interpolation quantiles, sample standard deviation, and MAD
//!   scaled by `1 / 0.6745` throughout the crate.
//! - Fallible entry points return
//!   [`StatResult`](crate::statistical_tests::StatResult).

pub mod quantile;
pub mod summary;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::quantile::{median, median_absolute_deviation, quantile, quantile_sorted};
pub use self::summary::StatisticalSummary;

//! statistical_tests — normality and outlier tests used by the detectors.
//!
//! Purpose
//! -------
//! Collect the hypothesis tests that back the univariate detector's
//! diagnostics, together with their shared input validation and error
//! handling, including Python bridges for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Normality: Shapiro–Wilk ([`SWOutcome`]), D'Agostino–Pearson K²
//!   ([`K2Outcome`]), and Anderson–Darling ([`ADOutcome`]).
//! - Outliers on (approximately) normal data: Grubbs ([`GrubbsOutcome`]),
//!   generalized ESD ([`GesdOutcome`]), and Dixon's Q ([`DixonOutcome`]).
//!   Each exposes a per-point boolean mask aligned with its input.
//! - Centralize input guards in [`validate_sample`] and [`validate_alpha`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every test validates its inputs and reports failures via
//!   [`StatResult`]; none panics on user-facing invalid inputs.
//! - Constant samples are reported as [`StatTestError::ZeroVariance`]
//!   wherever the statistic would divide by a zero spread.
//! - At the Python boundary all [`StatTestError`] values map to
//!   `PyValueError` with the `Display` message preserved.
//!
//! Conventions
//! -----------
//! - Test entry points are associated constructors on an outcome struct
//!   (e.g. [`SWOutcome::shapiro_wilk`]) with private fields and accessor
//!   methods.
//! - Sample-size windows outside which a test is not applied (5000 for
//!   Shapiro–Wilk, 8 for K², 15 for GESD, 3..=30 for Dixon) are constants
//!   of the respective modules; the detection layer decides whether to skip.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_anomaly::statistical_tests::{SWOutcome, StatResult};
//!
//!   fn w_of(data: &[f64]) -> StatResult<f64> {
//!       Ok(SWOutcome::shapiro_wilk(data)?.w())
//!   }
//!   ```
//!
//! Testing notes
//! -------------
//! - Each test module carries unit tests for acceptance on well-behaved
//!   data, rejection on contaminated data, and every guard.

pub mod anderson_darling;
pub mod dagostino;
pub mod dixon;
pub mod errors;
pub mod gesd;
pub mod grubbs;
pub mod shapiro_wilk;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::anderson_darling::ADOutcome;
pub use self::dagostino::K2Outcome;
pub use self::dixon::{DixonConfidence, DixonFlag, DixonOutcome};
pub use self::errors::{StatResult, StatTestError};
pub use self::gesd::GesdOutcome;
pub use self::grubbs::GrubbsOutcome;
pub use self::shapiro_wilk::SWOutcome;
pub use self::validation::{validate_alpha, validate_sample};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_anomaly::statistical_tests::prelude::*;
//
// to import the main statistical-testing surface in a single line.

pub mod prelude {
    pub use super::errors::{StatResult, StatTestError};
    pub use super::{
        ADOutcome, DixonConfidence, DixonOutcome, GesdOutcome, GrubbsOutcome, K2Outcome,
        SWOutcome,
    };
}

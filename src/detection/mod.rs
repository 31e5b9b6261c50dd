//! detection — univariate statistical anomaly detection.
//!
//! Purpose
//! -------
//! Assemble the statistical layers of the crate into one detector: a
//! descriptive summary, three distance checks (SD, MAD, IQR) combined with
//! fixed weights, and a threshold classifier controlled by a sensitivity and
//! an anomaly-share cap. A diagnostic branch runs normality tests, a Box-Cox
//! normalization, and the Grubbs/GESD/Dixon tests alongside.
//!
//! Key behaviors
//! -------------
//! - [`univariate::detect_univariate_statistical`] is the single entry point;
//!   it never returns an error. Invalid requests come back unscored with a
//!   fixed message ([`errors::ValidationFailure`]).
//! - Scoring uses only the raw values. Normalization and extended tests are
//!   reported in [`diagnostics::Diagnostics`] and in optional per-point
//!   flags, but do not change `anomaly_score` or `is_anomaly`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output cardinality and order equal the input's.
//! - Weights are `0.25 / 0.45 / 0.35` and are not renormalized.
//! - Every division by a spread estimate is guarded; a zero spread yields a
//!   saturated or zero score, never NaN.
//!
//! Conventions
//! -----------
//! - Option structs live in [`core::options`]; records in [`core::data`].
//! - Events are emitted through `tracing` at `debug`/`trace` level; the
//!   crate never installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! - Rust callers import [`prelude`]; the PyO3 layer in `lib.rs` wraps the
//!   same entry point.
//!
//! Testing notes
//! -------------
//! - Unit tests sit beside each stage. End-to-end fixtures and property
//!   tests (cardinality, sensitivity and cap monotonicity) live in `tests/`.

pub mod classify;
pub mod core;
pub mod diagnostics;
pub mod distance;
pub mod errors;
pub mod extended;
pub mod normality;
pub mod normalization;
pub mod scoring;
pub mod univariate;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    AnnotatedObservation, DetectionOptions, ExtendedTestOptions, NormalityOptions, Observation,
};
pub use self::diagnostics::{Details, Diagnostics, ENSEMBLE_MESSAGE};
pub use self::errors::{NormalizationError, ValidationFailure};
pub use self::scoring::Weights;
pub use self::univariate::{
    DetectionOutcome, DetectionResponse, PARALLEL_THRESHOLD, detect_univariate_statistical,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_anomaly::detection::prelude::*;
//
// to import the detector surface in a single line.

pub mod prelude {
    pub use super::core::{AnnotatedObservation, DetectionOptions, Observation};
    pub use super::diagnostics::Details;
    pub use super::scoring::Weights;
    pub use super::univariate::{DetectionOutcome, DetectionResponse, detect_univariate_statistical};
}

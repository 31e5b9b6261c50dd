//! detection::core — data records, options, and request validation.
//!
//! Purpose
//! -------
//! Hold the building blocks shared by every stage of the detector: the
//! input/output records ([`data`]), the per-call configuration
//! ([`options`]), and the soft-failure gate ([`validation`]).
//!
//! Conventions
//! -----------
//! - Nothing here performs numerical work; the scoring stages live one level
//!   up in `detection`.

pub mod data;
pub mod options;
pub mod validation;

pub use self::data::{AnnotatedObservation, Observation};
pub use self::options::{DetectionOptions, ExtendedTestOptions, NormalityOptions};
pub use self::validation::{MIN_OBSERVATIONS, validate_request};

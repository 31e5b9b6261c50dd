//! numerical_stability — guarded transforms used by likelihood fits.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar and vector transforms so the
//! optimization and detection layers can assume well-conditioned `f64`
//! arithmetic. The module currently hosts the Box-Cox power transform, its
//! profile log-likelihood, and their λ derivatives.
//!
//! Invariants & assumptions
//! ------------------------
//! - Scalar transforms assume inputs already inside their domain; the
//!   vector entry point [`box_cox_all`] validates positivity.
//! - Near λ = 0 the transform switches to its logarithmic limit below
//!   [`LAMBDA_EPS`] and uses `expm1` just above it.
//!
//! Conventions
//! -----------
//! - Pure functions over slices; no logging, I/O, or global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naïve formulas on
//!   safe grids and check the λ → 0 limit and degenerate samples.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    LAMBDA_EPS, box_cox, box_cox_all, box_cox_dlambda, box_cox_profile_loglik,
    box_cox_profile_score,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_anomaly::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{box_cox, box_cox_all};
}

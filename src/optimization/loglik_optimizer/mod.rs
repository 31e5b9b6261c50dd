//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide an Argmin-backed layer for **maximizing log-likelihoods** `ℓ(θ)`.
//! Callers implement [`LogLikelihood`] and invoke [`maximize`] to run L-BFGS
//! with a configurable line search, tolerances, and a finite-difference
//! gradient fallback. The detection layer uses it to estimate the Box-Cox
//! λ by profile maximum likelihood.
//!
//! Key behaviors
//! -------------
//! - Convert `ℓ(θ)` into an Argmin cost `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`].
//! - [`maximize`] validates θ₀ with [`LogLikelihood::check`], selects a
//!   solver through [`builders`], runs it with [`run::run_lbfgs`], and
//!   normalizes results into an [`OptimOutcome`].
//! - Centralize configuration ([`Tolerances`], [`MLEOptions`]) and checks
//!   ([`validation`]) so downstream code can assume finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes**; user code implements `ℓ(θ)` and
//!   optionally `∇ℓ(θ)`, never the cost directly.
//! - [`LogLikelihood::value`] reports invalid inputs as [`OptError`]
//!   values, not panics.
//! - [`OptimOutcome::value`] is expressed in terms of `ℓ`, not the cost.
//!
//! Conventions
//! -----------
//! - Parameters live in unconstrained space as [`Theta`] (`Array1<f64>`).
//! - Errors bubble up as [`OptResult<T>`] / [`OptError`]; this module never
//!   intentionally panics or uses `unsafe`.
//! - Progress is reported through `tracing` debug events when
//!   [`MLEOptions::verbose`] is set; the `obs_slog` feature adds Argmin's
//!   slog observer.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sign conventions in [`adapter`], solver construction
//!   in [`builders`], configuration invariants in [`traits`], guards in
//!   [`validation`], and end-to-end maximization of toy likelihoods in
//!   [`api`].
//!
//! [`OptError`]: crate::optimization::errors::OptError
//! [`OptResult<T>`]: crate::optimization::errors::OptResult

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_anomaly::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}

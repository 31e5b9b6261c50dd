//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer behind the Box-Cox normalizer: an
//! Argmin-backed log-likelihood optimizer, numerically guarded power
//! transforms, and a single error/result surface. Callers implement a
//! log-likelihood, choose tolerances, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), including solver and stopping-criteria
//!   configuration.
//! - Supply the Box-Cox transform and its profile likelihood
//!   (`numerical_stability`).
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into `errors::OptError` with the alias `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ` and assume
//!   finite inputs once validation has passed; invalid states are reported
//!   as `OptError`, not panics.
//! - Likelihood implementations treat domain violations (non-positive
//!   data, degenerate transforms) as recoverable errors.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; user-facing
//!   outcomes are expressed in terms of `ℓ`.
//! - Public entry points that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//!
//! Downstream usage
//! ----------------
//! - `detection::normalization` implements `LogLikelihood` for the Box-Cox
//!   λ and calls `maximize` with `MLEOptions`.
//! - Front-ends import the curated surface via `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_anomaly::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}

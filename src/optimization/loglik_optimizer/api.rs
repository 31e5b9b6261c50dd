//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`),
//! and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes `c(θ) = -ℓ(θ)`.
/// - Builds the solver named by `opts.line_searcher` and runs it.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors and runtime errors from `run_lbfgs`.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rust_anomaly::optimization::errors::OptResult;
/// use rust_anomaly::optimization::loglik_optimizer::{
///     LogLikelihood, MLEOptions, Theta, maximize,
/// };
///
/// struct Parabola;
/// impl LogLikelihood for Parabola {
///     type Data = f64;
///     fn value(&self, theta: &Theta, center: &f64) -> OptResult<f64> {
///         Ok(-(theta[0] - center).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &f64) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Parabola, array![0.0], &2.5, &MLEOptions::default())?;
/// assert!((out.theta_hat[0] - 2.5).abs() < 1e-4);
/// # Ok::<(), rust_anomaly::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

//! rust_anomaly — univariate statistical anomaly detection with PyO3 bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for `rust_anomaly`, wiring together the
//! descriptive statistics, the statistical tests, the Box-Cox optimizer, and
//! the ensemble detector, and exposing a Python extension module when the
//! `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`statistics`, `statistical_tests`,
//!   `optimization`, `detection`) for use from other Rust crates.
//! - Define the `#[pyclass]` wrapper [`UnivariateDetection`] and the
//!   `#[pymodule]` initializer for the `_rust_anomaly` Python extension.
//! - Create and register the `univariate` submodule under `rust_anomaly`
//!   so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - The Python class never raises for an out-of-range sensitivity or cap;
//!   like the Rust entry point it returns unscored results with a message.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_anomaly.<submodule>`, and the
//!   submodule is also registered as `rust_anomaly.<submodule>`.
//! - Errors from core Rust code are converted to `PyErr` values at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should call
//!   [`detection::detect_univariate_statistical`] directly and can ignore
//!   the items guarded by `python-bindings`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`. The PyO3 layer is exercised from
//!   Python.

pub mod detection;
pub mod optimization;
pub mod statistical_tests;
pub mod statistics;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    detection::univariate::{DetectionOutcome, detect_univariate_statistical},
    utils::{extract_detection_options, extract_mle_opts, extract_observations},
};

/// UnivariateDetection — Python-facing wrapper for the ensemble detector.
///
/// Purpose
/// -------
/// Run [`detect_univariate_statistical`] on Python data and expose the
/// per-point results as NumPy arrays.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `UnivariateDetection(values, keys=None, sensitivity_score=50,
/// max_fractional_anomalies=1.0, debug=False, alpha=None, normalize=True,
/// extended_tests=True, tol_grad=None, max_iter=None, line_searcher=None)`:
/// - `values`: one-dimensional array-like of `f64`.
/// - `keys`: optional sequence of keys, same length as `values`; defaults
///   to the positions as strings.
/// - `sensitivity_score`, `max_fractional_anomalies`: classification knobs,
///   validated by the detector.
/// - `debug`: expose `weights` and `details_status` when `True`.
/// - `alpha`: significance level of the normality tests.
/// - `normalize`, `extended_tests`: toggle the diagnostic branch.
/// - `tol_grad`, `max_iter`, `line_searcher`: Box-Cox fit settings.
///
/// Notes
/// -----
/// - Native Rust code should call the detector directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_anomaly.univariate")]
pub struct UnivariateDetection {
    inner: DetectionOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl UnivariateDetection {
    #[new]
    #[pyo3(
        text_signature = "(values, /, keys=None, sensitivity_score=50.0, \
                          max_fractional_anomalies=1.0, debug=False, alpha=None, \
                          normalize=True, extended_tests=True, tol_grad=None, \
                          max_iter=None, line_searcher=None)",
        signature = (
            values, keys = None, sensitivity_score = 50.0, max_fractional_anomalies = 1.0,
            debug = false, alpha = None, normalize = true, extended_tests = true,
            tol_grad = None, max_iter = None, line_searcher = None
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, values: &Bound<'py, PyAny>, keys: Option<&Bound<'py, PyAny>>,
        sensitivity_score: f64, max_fractional_anomalies: f64, debug: bool, alpha: Option<f64>,
        normalize: bool, extended_tests: bool, tol_grad: Option<f64>, max_iter: Option<usize>,
        line_searcher: Option<&str>,
    ) -> PyResult<UnivariateDetection> {
        let observations = extract_observations(py, keys, values)?;
        let mle = extract_mle_opts(tol_grad, None, max_iter, line_searcher)?;
        let opts = extract_detection_options(
            sensitivity_score,
            max_fractional_anomalies,
            debug,
            alpha,
            normalize,
            extended_tests,
            mle,
        )?;
        let inner = py.allow_threads(|| detect_univariate_statistical(&observations, &opts));
        Ok(UnivariateDetection { inner })
    }

    /// Observation keys, in input order.
    #[getter]
    pub fn keys(&self) -> Vec<String> {
        self.inner.anomalies().iter().map(|a| a.key.clone()).collect()
    }

    /// Per-point anomaly flags.
    #[getter]
    pub fn is_anomaly<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        self.inner.anomalies().iter().map(|a| a.is_anomaly).collect::<Vec<_>>().into_pyarray(py)
    }

    /// Per-point anomaly scores in `[0, 1.05]`.
    #[getter]
    pub fn anomaly_score<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.anomalies().iter().map(|a| a.anomaly_score).collect::<Vec<_>>().into_pyarray(py)
    }

    /// Number of flagged points.
    #[getter]
    pub fn anomaly_count(&self) -> usize {
        self.inner.anomaly_count()
    }

    /// `(sds, mads, iqrs)` weights, or `None` unless `debug`.
    #[getter]
    pub fn weights(&self) -> Option<(f64, f64, f64)> {
        let w = self.inner.weights();
        self.inner.debug().then_some((w.sds, w.mads, w.iqrs))
    }

    /// Ensemble description or rejection message.
    #[getter]
    pub fn message(&self) -> String {
        self.inner.details().message().to_string()
    }

    /// Box-Cox status line, or `None` unless `debug` and normalization ran.
    #[getter]
    pub fn details_status(&self) -> Option<String> {
        if !self.inner.debug() {
            return None;
        }
        self.inner
            .details()
            .diagnostics()
            .and_then(|d| d.normalization.as_ref())
            .map(|r| r.status.clone())
    }
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_anomaly<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let univariate_mod = PyModule::new(_py, "univariate")?;
    univariate(_py, m, &univariate_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_anomaly.univariate", univariate_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn univariate<'py>(
    _py: Python, rust_anomaly: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<UnivariateDetection>()?;
    rust_anomaly.add_submodule(m)?;
    Ok(())
}

//! utils — conversion helpers for the PyO3 layer.
//!
//! Purpose
//! -------
//! Turn loosely typed Python inputs (NumPy arrays, pandas Series, plain
//! sequences, optional scalars) into the crate's Rust types, reporting
//! malformed inputs as `PyTypeError` / `PyValueError`.
//!
//! Conventions
//! -----------
//! - Every helper is compiled only with the `python-bindings` feature.
//! - Range checks on the detector's sensitivity and cap are *not* done here;
//!   they are soft failures reported by the detector itself.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use crate::{
    detection::core::{
        data::Observation,
        options::{DetectionOptions, ExtendedTestOptions, NormalityOptions},
    },
    optimization::{
        errors::OptError,
        loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Extract a contiguous 1-D `float64` view from an array, Series, or sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Extract observation keys, or number them `"0".."n-1"` when absent.
///
/// Non-string keys are converted with Python's `str()`.
#[cfg(feature = "python-bindings")]
pub fn extract_keys<'py>(keys: Option<&Bound<'py, PyAny>>, len: usize) -> PyResult<Vec<String>> {
    let Some(keys) = keys else {
        return Ok((0..len).map(|i| i.to_string()).collect());
    };
    let keys: Vec<String> = keys
        .try_iter()?
        .map(|item| item.and_then(|k| k.str().map(|s| s.to_string())))
        .collect::<PyResult<_>>()?;
    if keys.len() != len {
        return Err(PyValueError::new_err(format!(
            "keys and values must have the same length ({} != {len})",
            keys.len()
        )));
    }
    Ok(keys)
}

/// Zip keys and values into observations.
#[cfg(feature = "python-bindings")]
pub fn extract_observations<'py>(
    py: Python<'py>, keys: Option<&Bound<'py, PyAny>>, values: &Bound<'py, PyAny>,
) -> PyResult<Vec<Observation>> {
    let arr = extract_f64_array(py, values)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("values must be a 1-D contiguous float64 array or sequence")
    })?;
    let keys = extract_keys(keys, slice.len())?;
    Ok(keys.into_iter().zip(slice.iter().copied()).map(|(k, v)| Observation::new(k, v)).collect())
}

/// Optimizer options for the Box-Cox fit.
#[cfg(feature = "python-bindings")]
pub fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>,
) -> PyResult<MLEOptions> {
    let defaults = MLEOptions::default();
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(PyErr::from)?
    };
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(PyErr::from)?,
        None => defaults.line_searcher,
    };
    MLEOptions::new(tols, ls, false, None).map_err(|e: OptError| e.into())
}

/// Assemble detector options from keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn extract_detection_options(
    sensitivity_score: f64, max_fractional_anomalies: f64, debug: bool, alpha: Option<f64>,
    normalize: bool, extended_tests: bool, boxcox_fit: MLEOptions,
) -> PyResult<DetectionOptions> {
    let defaults = NormalityOptions::default();
    let normality = match alpha {
        Some(a) => NormalityOptions::new(a, defaults.shapiro_max_n, defaults.dagostino_min_n)?,
        None => defaults,
    };
    let extended =
        if extended_tests { ExtendedTestOptions::default() } else { ExtendedTestOptions::disabled() };
    Ok(DetectionOptions {
        sensitivity_score,
        max_fractional_anomalies,
        debug,
        normality,
        extended,
        run_normalization: normalize,
        boxcox_fit,
    })
}

//! detection::core::data — input observations and annotated output records.
//!
//! Purpose
//! -------
//! Define the per-point records flowing into and out of the detector. An
//! [`Observation`] is an opaque key with a numeric value; an
//! [`AnnotatedObservation`] is the same pair decorated with the three
//! distance scores, the combined anomaly score, the flag, and the optional
//! extended-test verdicts.
//!
//! Invariants & assumptions
//! ------------------------
//! - Keys are opaque strings; they need not be unique and are never parsed.
//! - The detector returns exactly one `AnnotatedObservation` per input
//!   `Observation`, in input order.
//! - Construction performs no validation. Finiteness and count checks happen
//!   in [`validate_request`](super::validation::validate_request) so that
//!   invalid requests can still be echoed back.
//!
//! Conventions
//! -----------
//! - Output records derive `Serialize` with snake_case field names. Extended
//!   flags are omitted from the serialized form when the test did not run.

use serde::Serialize;

/// Observation — one `(key, value)` pair of the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub key: String,
    pub value: f64,
}

impl Observation {
    /// Create an observation from any string-like key.
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Observation { key: key.into(), value }
    }

    /// Build a dataset from `(key, value)` pairs, preserving order.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_anomaly::detection::core::data::Observation;
    ///
    /// let obs = Observation::from_pairs([("a", 1.0), ("b", 2.0)]);
    /// assert_eq!(obs.len(), 2);
    /// assert_eq!(obs[1].key, "b");
    /// ```
    pub fn from_pairs<K, I>(pairs: I) -> Vec<Observation>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        pairs.into_iter().map(|(k, v)| Observation::new(k, v)).collect()
    }
}

/// AnnotatedObservation — one scored output record.
///
/// Fields
/// ------
/// - `key`, `value`: copied from the input.
/// - `sds`, `mads`, `iqrs`: distance-check scores in `[0, 1]`.
/// - `anomaly_score`: weighted combination of the three scores.
/// - `is_anomaly`: classifier verdict.
/// - `grubbs`, `gesd`, `dixon`: per-point masks of the extended tests,
///   `None` when the test did not run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedObservation {
    pub key: String,
    pub value: f64,
    pub sds: f64,
    pub mads: f64,
    pub iqrs: f64,
    pub anomaly_score: f64,
    pub is_anomaly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grubbs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesd: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dixon: Option<bool>,
}

impl AnnotatedObservation {
    /// Echo an observation from a rejected request: zero scores, no flag.
    pub fn rejected(obs: &Observation) -> Self {
        AnnotatedObservation {
            key: obs.key.clone(),
            value: obs.value,
            sds: 0.0,
            mads: 0.0,
            iqrs: 0.0,
            anomaly_score: 0.0,
            is_anomaly: false,
            grubbs: None,
            gesd: None,
            dixon: None,
        }
    }
}

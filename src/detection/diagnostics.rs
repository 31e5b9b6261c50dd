//! detection::diagnostics — the informational bundle returned with results.
//!
//! [`Details`] is either the fixed rejection message of an invalid request
//! or a full [`Diagnostics`] record. Both serialize untagged, so transport
//! layers see `{"message": ...}` with or without the extra fields.

use serde::Serialize;

use crate::{
    detection::{extended::TestsRun, normalization::NormalizationReport},
    statistics::StatisticalSummary,
};

/// Message attached to every successfully scored request.
pub const ENSEMBLE_MESSAGE: &str =
    "Ensemble of [mean +/- 3*SD, median +/- 3*MAD, median +/- 1.5IQR]";

/// Details — rejection message or diagnostics of a scored request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Rejected { message: String },
    Diagnostics(Box<Diagnostics>),
}

impl Details {
    /// Human-readable message in either form.
    pub fn message(&self) -> &str {
        match self {
            Details::Rejected { message } => message,
            Details::Diagnostics(diag) => &diag.message,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Details::Rejected { .. })
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Details::Diagnostics(diag) => Some(diag),
            Details::Rejected { .. } => None,
        }
    }
}

/// Diagnostics — everything computed for a scored request besides scores.
///
/// Fields
/// ------
/// - `message`: always [`ENSEMBLE_MESSAGE`].
/// - `summary`: statistics of the raw values used for scoring.
/// - `normalization`: normalizer report, including the verdicts on the raw
///   values, when the normality branch ran.
/// - `tests_run`: status of the extended tests.
/// - `threshold`: final classification threshold.
/// - `anomaly_count`: number of flagged points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub message: String,
    pub summary: StatisticalSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationReport>,
    pub tests_run: TestsRun,
    pub threshold: f64,
    pub anomaly_count: usize,
}

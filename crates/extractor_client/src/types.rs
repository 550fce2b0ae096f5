use std::fmt;

use extractor_core::{PreviewTable, ProgressUpdate, StatusUpdate};
use serde::Deserialize;

/// One result record as returned by the view endpoint: column name to value.
///
/// `serde_json::Map` keeps the server's key order, which the preview shaping
/// ignores anyway since it projects a fixed column subset.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Body of the scrape submission response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeOutcome {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Status endpoint payload.
///
/// Every field defaults so a sparse body from an older server still parses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub is_scraping: bool,
    #[serde(default)]
    pub latest_file: Option<String>,
    #[serde(default)]
    pub progress: ProgressReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProgressReport {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub current_area: String,
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default)]
    pub status: String,
}

/// View endpoint payload: the full result dataset plus an optional column
/// order hint.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewDocument {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<RawRecord>,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl From<StatusReport> for StatusUpdate {
    fn from(report: StatusReport) -> Self {
        StatusUpdate {
            is_scraping: report.is_scraping,
            latest_file: report.latest_file,
            progress: ProgressUpdate {
                total: report.progress.total,
                processed: report.progress.processed,
                current_area: report.progress.current_area,
                log: report.progress.log,
                status: report.progress.status,
            },
        }
    }
}

/// Typed failure from any API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
    /// 2xx response whose body reports a non-success status.
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Rejected => write!(f, "request rejected"),
        }
    }
}

/// Events the worker pushes back to the UI thread.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Outcome of the single scrape submission attempt.
    Submission { result: Result<(), ApiError> },
    /// One status poll tick.
    StatusTick {
        result: Result<StatusReport, ApiError>,
    },
    /// Outcome of a preview fetch, already shaped for rendering.
    Preview {
        result: Result<PreviewTable, ApiError>,
    },
}

use std::io;

use thiserror::Error;

/// Error type for report generation, export, and persistence failures.
///
/// Fetch and computation failures abort the whole report (no partial table
/// is ever returned); persistence and open-artifact failures are recoverable
/// and reported to the caller independently of data correctness.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read '{collection}' from the record store: {reason}")]
    Fetch { collection: String, reason: String },
    #[error("no '{collection}' record with id '{id}'")]
    MissingRecord { collection: String, id: String },
    #[error("cycle '{cycle}' has a zero land area; cannot derive quantity per hectare")]
    ZeroArea { cycle: String },
    #[error("malformed record data: {0}")]
    Data(#[from] serde_json::Error),
    #[error("workbook assembly failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    #[error("report persistence failed: {0}")]
    Persistence(#[from] io::Error),
    #[error("could not open report artifact: {0}")]
    OpenArtifact(String),
}

impl ReportError {
    pub fn fetch(collection: &str, reason: impl ToString) -> Self {
        ReportError::Fetch {
            collection: collection.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(collection: &str, id: &str) -> Self {
        ReportError::MissingRecord {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// Persistence and viewer failures leave the underlying report data
    /// intact; everything else invalidates the whole generation attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReportError::Persistence(_) | ReportError::OpenArtifact(_)
        )
    }
}

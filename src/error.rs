use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a call log or writing the report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot read call log {path:?}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Call log {path:?} contains no worksheets")]
    EmptyWorkbook { path: PathBuf },

    #[error("Malformed record in row {row}: field `{field}` {reason}")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Failed to write report: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

impl ReportError {
    pub fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ReportError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        ReportError::MalformedRecord {
            row,
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

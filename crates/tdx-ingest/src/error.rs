//! Error types for report ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort loading a report.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Report file not found.
    #[error("report file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the report.
    #[error("failed to read report {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report is not structurally valid CSV.
    #[error("malformed report {path}{}: {message}", line_suffix(.line))]
    MalformedReport {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },
}

impl IngestError {
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        let line = err.position().map(csv::Position::line);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::FileRead { path, source },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => Self::MalformedReport {
                path,
                line,
                message: format!("expected {expected_len} fields, found {len}"),
            },
            csv::ErrorKind::Utf8 { err, .. } => Self::MalformedReport {
                path,
                line,
                message: format!("invalid UTF-8: {err}"),
            },
            other => Self::MalformedReport {
                path,
                line,
                message: format!("{other:?}"),
            },
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" (line {line})")).unwrap_or_default()
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

// ============================================================
// Layer 3 — Pipeline Error Taxonomy
// ============================================================
// Every stage-level operation fails with one of these kinds.
// Failures are never retried or swallowed: the stage aborts and
// the error travels up to main(), which reports it and exits
// with a non-zero status.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by ingestion, preprocessing, and persistence.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A resource could not be read or written
    #[error("I/O failure on '{path}': {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    /// A remote source could not be fetched
    #[error("failed to fetch '{url}': {reason}")]
    Fetch { url: String, reason: String },

    /// The input is not valid tabular (or YAML) data
    #[error("parse error: {0}")]
    Parse(String),

    /// An expected column is absent
    #[error("schema error: {0}")]
    Schema(String),

    /// A configuration value is out of range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Zero rows where at least one row is required
    #[error("no data: {0}")]
    EmptyData(String),

    /// A row-level transformation met an unexpected value
    #[error("transform error: {0}")]
    Transform(String),
}

impl PipelineError {
    /// Wrap an io::Error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors produced by the sleep report pipeline.
///
/// Any of these aborts the run before an artifact is written.
#[derive(Error, Debug)]
pub enum SleepError {
    /// A batch file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report artifact could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A batch file is not a valid JSON document.
    #[error("Failed to parse batch {source_name}: {source}")]
    BatchParse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A renderer could not serialise report data.
    #[error("Failed to render {renderer} report: {source}")]
    Render {
        renderer: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A batch document lacks the record list at the expected path.
    #[error("Malformed batch {source_name}: {reason}")]
    MalformedInput { source_name: String, reason: String },

    /// No batch sources were supplied or discovered.
    #[error("No sleep record batches to analyse")]
    NoSources,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the sleep crates.
pub type Result<T> = std::result::Result<T, SleepError>;

/// Why a single record was skipped during ingestion.
///
/// Never fatal: the record is dropped and the batch continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidRecord {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no startDate")]
    MissingStartDate,

    #[error("unparsable startDate: {0}")]
    UnparsableStartDate(String),

    #[error("non-numeric totalUsage: {0}")]
    NonNumericDuration(String),
}

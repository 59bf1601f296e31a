//! Ingestion error types

use thiserror::Error;

/// Errors that can occur while splitting a record stream
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not valid JSON
    #[error("Invalid JSON on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line is valid JSON but not an object
    #[error("Line {line} is not a JSON object")]
    NotAnObject { line: usize },

    /// Writing a split record failed
    #[error("Failed to serialize record from line {line}: {source}")]
    Serialize {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

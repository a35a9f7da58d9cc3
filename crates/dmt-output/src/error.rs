//! Error types for table output.

use thiserror::Error;

/// Errors that can occur while writing a table or its domains.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to write delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// Fields can only be separated by a single-byte character.
    #[error("delimiter {delimiter:?} is not a single-byte character")]
    Delimiter { delimiter: char },
}

/// Result type alias for output.
pub type Result<T> = std::result::Result<T, OutputError>;

//! Error types for table ingestion.

use std::path::PathBuf;

use dmt_model::TableError;
use thiserror::Error;

/// Errors that can occur while reading a table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be opened.
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The delimited text could not be split into records.
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// A record was split but its cells do not form a valid table.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Result type alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

//! Reading delimited text into typed, weighted tables.

pub mod error;
pub mod reader;

pub use error::{IngestError, Result};
pub use reader::{read_table, read_table_from_path};

//! Error types for table and attribute operations.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::attribute::AttributeKind;

/// Errors raised by the table model and the transformations built on it.
///
/// Every operation either succeeds or fails with exactly one of these.
/// Nothing here is retried: the operations are in-memory transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Intermediate storage could not be allocated.
    #[error("out of memory while allocating {what}")]
    OutOfMemory { what: &'static str },

    /// The operation needs a different kind of column.
    #[error("attribute '{attribute}' is {actual}, expected {expected}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        actual: AttributeKind,
    },

    /// A referenced attribute name is not part of the attribute set.
    #[error("unknown attribute: {name}")]
    UnknownAttribute { name: String },

    /// A value failed to parse or coerce.
    #[error("malformed value '{text}' for attribute '{attribute}': {reason}")]
    MalformedValue {
        attribute: String,
        text: String,
        reason: String,
    },

    /// Attribute names must be unique within a set.
    #[error("duplicate attribute name: {name}")]
    DuplicateAttribute { name: String },

    /// A tuple does not have one value per attribute.
    #[error("row {row} has {actual} values, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

impl TableError {
    /// Create an `OutOfMemory` error for the named allocation.
    pub fn out_of_memory(what: &'static str) -> Self {
        Self::OutOfMemory { what }
    }

    /// Create an `UnknownAttribute` error.
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute { name: name.into() }
    }

    /// Create a `MalformedValue` error.
    pub fn malformed(
        attribute: impl Into<String>,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            attribute: attribute.into(),
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors that must abort the whole pipeline.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

/// Map a failed `try_reserve` onto [`TableError::OutOfMemory`].
pub fn reserve_error(what: &'static str) -> impl FnOnce(TryReserveError) -> TableError {
    move |_| TableError::out_of_memory(what)
}

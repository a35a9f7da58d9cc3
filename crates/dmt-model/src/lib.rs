//! Data model for weighted data-mining tables.
//!
//! - **attribute**: attribute kinds and their domains (labels or intervals)
//! - **attribute_set**: ordered, name-unique attribute collections
//! - **value**: tagged cell values and weighted tuples
//! - **table**: a weighted multiset of tuples owning its attribute set
//! - **coerce**: auto typing of raw text
//! - **options**: configuration for reading, transforming and writing

pub mod attribute;
pub mod attribute_set;
pub mod coerce;
pub mod error;
pub mod options;
pub mod table;
pub mod value;

pub use attribute::{
    Attribute, AttributeDomain, AttributeKind, DEFAULT_PRECISION, FloatDomain, IntegerDomain,
    NominalDomain, NumericDomain,
};
pub use attribute_set::AttributeSet;
pub use coerce::{DEFAULT_NULL_MARKER, TextClass, classify_text, coerce};
pub use error::{Result, TableError};
pub use options::{
    CoverageMode, CoverageOptions, DomainOptions, NormalizeOptions, ReadOptions, SortDirection,
    WeightColumn, WriteOptions,
};
pub use table::Table;
pub use value::{Tuple, Value};

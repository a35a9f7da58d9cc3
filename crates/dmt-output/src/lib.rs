//! Output of weighted tables.
//!
//! - **writer**: delimited text with optional alignment and weights
//! - **domains**: `dom(name) = ...;` domain descriptions
//! - **format**: `%g`-style number rendering shared by both

pub mod domains;
pub mod error;
pub mod format;
pub mod writer;

pub use domains::write_domains;
pub use error::{OutputError, Result};
pub use format::{format_significant, format_weight, render_value};
pub use writer::{WEIGHT_HEADER, write_table};

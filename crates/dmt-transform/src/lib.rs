//! Transformations over weighted tables.
//!
//! - **domain_sort**: canonical label order for nominal domains
//! - **reduce**: merge duplicate tuples into weighted distinct tuples
//! - **coverage**: one-point coverage tables
//! - **sort**: multi-key tuple sorting
//! - **normalize**: standardization and range mapping of numeric columns
//! - **classify**: metric and nominal axes for plotting
//! - **combine**: projection and merging

pub mod classify;
pub mod combine;
pub mod coverage;
pub mod domain_sort;
pub mod normalize;
pub mod reduce;
pub mod sort;

pub use classify::{Classification, DisplayRange, MetricAxis, NominalAxis, classify};
pub use combine::{merge, project};
pub use coverage::build_coverage;
pub use domain_sort::{
    LabelComparator, LabelOrder, compare_lexicographic, compare_numeric, sort_all_domains,
    sort_domain, sort_domain_by_name,
};
pub use normalize::{
    ColumnStats, Degenerate, NormalizeOutcome, column_stats, normalize_all, normalize_column,
    normalize_column_by_name,
};
pub use reduce::{ReduceSummary, reduce, reduce_tuples};
pub use sort::{KeyOrder, TupleOrder, sort_table, sort_table_with};

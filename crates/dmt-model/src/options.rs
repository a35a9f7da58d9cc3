//! Configuration options for reading, transforming and writing tables.

use serde::{Deserialize, Serialize};

use crate::attribute::DEFAULT_PRECISION;
use crate::coerce::DEFAULT_NULL_MARKER;

/// Where a table keeps its tuple weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightColumn {
    /// Every tuple has weight 1.
    #[default]
    None,
    /// The last field of every record is the tuple weight.
    Last,
}

/// Options for reading delimited text tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Field delimiter (a single byte).
    pub delimiter: u8,
    /// Whether the first record holds attribute names.
    pub has_header: bool,
    /// Text standing for a missing value.
    pub null_marker: String,
    /// Weight field convention.
    pub weight_column: WeightColumn,
    /// Significant digits recorded for float attributes.
    pub float_precision: usize,
    /// Number that reads as a missing value in metric columns.
    pub null_sentinel: Option<i64>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            null_marker: DEFAULT_NULL_MARKER.to_string(),
            weight_column: WeightColumn::None,
            float_precision: DEFAULT_PRECISION,
            null_sentinel: None,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_weight_column(mut self, weight_column: WeightColumn) -> Self {
        self.weight_column = weight_column;
        self
    }

    #[must_use]
    pub fn with_float_precision(mut self, digits: usize) -> Self {
        self.float_precision = digits;
        self
    }

    #[must_use]
    pub fn with_null_sentinel(mut self, sentinel: Option<i64>) -> Self {
        self.null_sentinel = sentinel;
        self
    }
}

/// Options for writing tables as delimited text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Field separator.
    pub delimiter: char,
    /// Emit a header record with the attribute names.
    pub header: bool,
    /// Pad fields so that columns line up.
    pub align: bool,
    /// Append the tuple weight as a trailing field.
    pub write_weights: bool,
    /// Text written for missing values.
    pub null_marker: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header: true,
            align: false,
            write_weights: false,
            null_marker: DEFAULT_NULL_MARKER.to_string(),
        }
    }
}

impl WriteOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: bool) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, write_weights: bool) -> Self {
        self.write_weights = write_weights;
        self
    }

    #[must_use]
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }
}

/// Options for the textual domain description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainOptions {
    /// Describe metric domains by their interval instead of listing values.
    pub intervals: bool,
    /// Maximum output line width before wrapping.
    pub max_width: usize,
}

impl Default for DomainOptions {
    fn default() -> Self {
        Self {
            intervals: true,
            max_width: 78,
        }
    }
}

impl DomainOptions {
    #[must_use]
    pub fn with_intervals(mut self, intervals: bool) -> Self {
        self.intervals = intervals;
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }
}

/// Row multiplicity of a coverage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoverageMode {
    /// One row per attribute-value occurrence.
    Full,
    /// Identical rows merged with their weights summed.
    #[default]
    Condensed,
}

/// Options for building a one-point coverage table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CoverageOptions {
    pub mode: CoverageMode,
    /// Scale weights so the heaviest row of each attribute has weight 1.
    pub normalize: bool,
}

impl CoverageOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: CoverageMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// Direction of a table sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `+1` for ascending, `-1` for descending.
    pub fn multiplier(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Target center and scale of a column normalization.
///
/// A positive scale standardizes to mean `center` and standard deviation
/// `scale`; a negative scale maps the range onto `[center, center + |scale|]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub center: f64,
    pub scale: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            center: 0.0,
            scale: 1.0,
        }
    }
}

impl NormalizeOptions {
    pub fn standardize(center: f64, deviation: f64) -> Self {
        Self {
            center,
            scale: deviation.abs(),
        }
    }

    pub fn range(low: f64, width: f64) -> Self {
        Self {
            center: low,
            scale: -width.abs(),
        }
    }
}

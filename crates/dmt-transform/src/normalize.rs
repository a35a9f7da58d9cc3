//! Rescaling of numeric columns.
//!
//! A positive scale standardizes a column to a target mean and standard
//! deviation; a negative scale maps its range onto a target interval.
//! Degenerate columns (no spread, no weight) are left unchanged.

use std::fmt;

use dmt_model::{AttributeKind, NormalizeOptions, Result, Table, TableError};
use serde::Serialize;
use tracing::{debug, info};

/// Weighted summary of the non-null values of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Total weight of the non-null values.
    pub weight: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub deviation: f64,
    /// Smallest value among tuples with positive weight.
    pub min: f64,
    /// Largest value among tuples with positive weight.
    pub max: f64,
}

/// Why a column was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Degenerate {
    /// The requested scale is zero.
    ZeroScale,
    /// The column has no non-null value with positive weight.
    NoWeight,
    /// All values are equal.
    NoSpread,
}

impl fmt::Display for Degenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Degenerate::ZeroScale => "target scale is zero",
            Degenerate::NoWeight => "no weighted values",
            Degenerate::NoSpread => "all values are equal",
        })
    }
}

/// Result of normalizing one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NormalizeOutcome {
    Rescaled { stats: ColumnStats },
    Unchanged { reason: Degenerate },
}

/// Compute weighted statistics of a metric column.
pub fn column_stats(table: &Table, attribute: usize) -> ColumnStats {
    let mut weight = 0.0;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (value, w) in table.column(attribute) {
        let Some(x) = value.as_f64() else {
            continue;
        };
        weight += w;
        sum += w * x;
        if w > 0.0 {
            min = min.min(x);
            max = max.max(x);
        }
    }
    let mean = if weight > 0.0 { sum / weight } else { 0.0 };
    let mut squares = 0.0;
    for (value, w) in table.column(attribute) {
        if let Some(x) = value.as_f64() {
            squares += w * (x - mean) * (x - mean);
        }
    }
    let deviation = if weight > 0.0 {
        (squares / weight).sqrt()
    } else {
        0.0
    };
    ColumnStats {
        weight,
        mean,
        deviation,
        min,
        max,
    }
}

/// Normalize one numeric column; integer columns become float columns first.
pub fn normalize_column(
    table: &mut Table,
    attribute: usize,
    options: NormalizeOptions,
) -> Result<NormalizeOutcome> {
    let target = table
        .attributes()
        .get(attribute)
        .ok_or_else(|| TableError::unknown_attribute(format!("#{attribute}")))?;
    if target.kind() == AttributeKind::Nominal {
        return Err(TableError::TypeMismatch {
            attribute: target.name().to_string(),
            expected: "numeric",
            actual: AttributeKind::Nominal,
        });
    }
    let name = target.name().to_string();
    table.coerce_to_float(attribute)?;

    let NormalizeOptions { center, scale } = options;
    let stats = column_stats(table, attribute);
    let outcome = if scale == 0.0 {
        NormalizeOutcome::Unchanged {
            reason: Degenerate::ZeroScale,
        }
    } else if stats.weight <= 0.0 || stats.min > stats.max {
        NormalizeOutcome::Unchanged {
            reason: Degenerate::NoWeight,
        }
    } else if scale > 0.0 {
        if stats.deviation > 0.0 {
            let ColumnStats {
                mean, deviation, ..
            } = stats;
            table.map_float_column(attribute, |x| (x - mean) / deviation * scale + center)?;
            NormalizeOutcome::Rescaled { stats }
        } else {
            NormalizeOutcome::Unchanged {
                reason: Degenerate::NoSpread,
            }
        }
    } else if stats.max > stats.min {
        let ColumnStats { min, max, .. } = stats;
        let width = -scale;
        table.map_float_column(attribute, |x| center + (x - min) / (max - min) * width)?;
        NormalizeOutcome::Rescaled { stats }
    } else {
        NormalizeOutcome::Unchanged {
            reason: Degenerate::NoSpread,
        }
    };
    debug!(attribute = %name, center, scale, ?outcome, "normalized column");
    Ok(outcome)
}

/// Normalize the named column.
pub fn normalize_column_by_name(
    table: &mut Table,
    name: &str,
    options: NormalizeOptions,
) -> Result<NormalizeOutcome> {
    let attribute = table
        .attributes()
        .index_of(name)
        .ok_or_else(|| TableError::unknown_attribute(name))?;
    normalize_column(table, attribute, options)
}

/// Normalize every numeric column, silently skipping nominal ones.
pub fn normalize_all(
    table: &mut Table,
    options: NormalizeOptions,
) -> Result<Vec<(usize, NormalizeOutcome)>> {
    let numeric: Vec<usize> = table
        .attributes()
        .iter()
        .enumerate()
        .filter(|(_, attribute)| attribute.kind().is_numeric())
        .map(|(index, _)| index)
        .collect();
    let mut outcomes = Vec::with_capacity(numeric.len());
    for attribute in numeric {
        outcomes.push((attribute, normalize_column(table, attribute, options)?));
    }
    info!(columns = outcomes.len(), "normalized numeric columns");
    Ok(outcomes)
}

/// Float values of a column in tuple order, nulls as `None`.
pub fn float_column(table: &Table, attribute: usize) -> Vec<Option<f64>> {
    table
        .column(attribute)
        .map(|(value, _)| value.as_f64())
        .collect()
}

#[cfg(test)]
mod tests {
    use dmt_model::{Attribute, AttributeSet, Tuple, Value};

    use super::*;

    fn column(values: &[Option<i64>]) -> Table {
        let attributes = AttributeSet::from_attributes([
            Attribute::nominal_with("id", ["a"]),
            Attribute::integer("x"),
        ])
        .expect("attributes");
        let tuples = values
            .iter()
            .map(|value| {
                Tuple::new(vec![
                    Value::Nominal(0),
                    value.map_or(Value::Null, Value::Integer),
                ])
            })
            .collect();
        Table::from_parts(attributes, tuples).expect("table")
    }

    #[test]
    fn nominal_column_is_a_type_mismatch() {
        let mut table = column(&[Some(1)]);
        let error = normalize_column(&mut table, 0, NormalizeOptions::default()).unwrap_err();
        assert!(matches!(error, TableError::TypeMismatch { .. }));
    }

    #[test]
    fn constant_column_is_left_unchanged() {
        let mut table = column(&[Some(4), Some(4), None]);
        let outcome =
            normalize_column(&mut table, 1, NormalizeOptions::default()).expect("normalize");
        assert_eq!(
            outcome,
            NormalizeOutcome::Unchanged {
                reason: Degenerate::NoSpread
            }
        );
        assert_eq!(float_column(&table, 1), vec![Some(4.0), Some(4.0), None]);
    }

    #[test]
    fn zero_scale_is_a_no_op() {
        let mut table = column(&[Some(1), Some(2)]);
        let options = NormalizeOptions {
            center: 5.0,
            scale: 0.0,
        };
        let outcome = normalize_column(&mut table, 1, options).expect("normalize");
        assert_eq!(
            outcome,
            NormalizeOutcome::Unchanged {
                reason: Degenerate::ZeroScale
            }
        );
    }

    #[test]
    fn range_mapping_keeps_nulls() {
        let mut table = column(&[Some(10), None, Some(20), Some(15)]);
        normalize_column(&mut table, 1, NormalizeOptions::range(-1.0, 2.0)).expect("normalize");
        assert_eq!(
            float_column(&table, 1),
            vec![Some(-1.0), None, Some(1.0), Some(0.0)]
        );
    }

    #[test]
    fn normalize_all_skips_nominal_columns() {
        let mut table = column(&[Some(1), Some(3)]);
        let outcomes = normalize_all(&mut table, NormalizeOptions::default()).expect("normalize");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, 1);
        assert_eq!(float_column(&table, 1), vec![Some(-1.0), Some(1.0)]);
    }
}

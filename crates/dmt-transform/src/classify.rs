//! Attribute classification for plotting.
//!
//! Splits a table's attributes into metric axes (integer and float columns,
//! each with a padded display range) and nominal axes (columns with at least
//! one label), and picks default horizontal, vertical and class axes.

use dmt_model::{AttributeDomain, AttributeKind, Result, Table, TableError};
use serde::Serialize;
use tracing::debug;

/// Closed interval shown along a metric axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    /// The fallback range for columns without usable bounds.
    pub const UNIT: DisplayRange = DisplayRange { min: 0.0, max: 1.0 };

    /// Compute the display range for declared bounds `[min, max]`.
    ///
    /// - any infinite bound yields `[0, 1]`
    /// - inverted bounds yield `[0, 1]`
    /// - equal bounds are widened to `[min - 1, max + 1]`
    /// - otherwise both ends move out by `padding * (max - min)`
    pub fn from_bounds(min: f64, max: f64, padding: f64) -> Self {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Self::UNIT;
        }
        if min == max {
            return Self {
                min: min - 1.0,
                max: max + 1.0,
            };
        }
        let pad = padding * (max - min);
        Self {
            min: min - pad,
            max: max + pad,
        }
    }
}

/// An integer or float attribute usable as a plot axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAxis {
    pub name: String,
    /// Position of the attribute in the table's attribute set.
    pub attribute: usize,
    pub kind: AttributeKind,
    pub range: DisplayRange,
}

/// A nominal attribute usable to color or group points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NominalAxis {
    pub name: String,
    pub attribute: usize,
    pub labels: Vec<String>,
}

/// Metric and nominal attributes of a table with the default axis choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    metrics: Vec<MetricAxis>,
    nominals: Vec<NominalAxis>,
    #[serde(skip)]
    metric_lookup: Vec<Option<usize>>,
    #[serde(skip)]
    nominal_lookup: Vec<Option<usize>>,
    horizontal: Option<usize>,
    vertical: Option<usize>,
    class: Option<usize>,
}

impl Classification {
    pub fn metrics(&self) -> &[MetricAxis] {
        &self.metrics
    }

    pub fn nominals(&self) -> &[NominalAxis] {
        &self.nominals
    }

    /// Position in [`Self::metrics`] of the given attribute, if it is metric.
    pub fn metric_of(&self, attribute: usize) -> Option<usize> {
        self.metric_lookup.get(attribute).copied().flatten()
    }

    /// Position in [`Self::nominals`] of the given attribute, if it is nominal.
    pub fn nominal_of(&self, attribute: usize) -> Option<usize> {
        self.nominal_lookup.get(attribute).copied().flatten()
    }

    /// Default horizontal axis: the first metric attribute.
    pub fn horizontal(&self) -> Option<&MetricAxis> {
        self.horizontal.map(|index| &self.metrics[index])
    }

    /// Default vertical axis: the second metric attribute.
    pub fn vertical(&self) -> Option<&MetricAxis> {
        self.vertical.map(|index| &self.metrics[index])
    }

    /// Default class axis: the last nominal attribute.
    pub fn class(&self) -> Option<&NominalAxis> {
        self.class.map(|index| &self.nominals[index])
    }
}

/// Classify the attributes of `table`, padding metric ranges by the
/// fraction `padding` of their width.
pub fn classify(table: &Table, padding: f64) -> Result<Classification> {
    if !padding.is_finite() || padding < 0.0 {
        return Err(TableError::malformed(
            "padding",
            padding.to_string(),
            "padding must be a finite, non-negative fraction",
        ));
    }

    let width = table.attributes().len();
    let mut metrics = Vec::new();
    let mut nominals = Vec::new();
    let mut metric_lookup = vec![None; width];
    let mut nominal_lookup = vec![None; width];

    for (index, attribute) in table.attributes().iter().enumerate() {
        match attribute.domain() {
            AttributeDomain::Nominal { values } => {
                if values.is_empty() {
                    continue;
                }
                nominal_lookup[index] = Some(nominals.len());
                nominals.push(NominalAxis {
                    name: attribute.name().to_string(),
                    attribute: index,
                    labels: values.labels().to_vec(),
                });
            }
            AttributeDomain::Integer { bounds } => {
                let range = DisplayRange::from_bounds(
                    resolve_integer(bounds.min),
                    resolve_integer(bounds.max),
                    padding,
                );
                metric_lookup[index] = Some(metrics.len());
                metrics.push(MetricAxis {
                    name: attribute.name().to_string(),
                    attribute: index,
                    kind: AttributeKind::Integer,
                    range,
                });
            }
            AttributeDomain::Float { bounds } => {
                let range = DisplayRange::from_bounds(
                    resolve_float(bounds.min),
                    resolve_float(bounds.max),
                    padding,
                );
                metric_lookup[index] = Some(metrics.len());
                metrics.push(MetricAxis {
                    name: attribute.name().to_string(),
                    attribute: index,
                    kind: AttributeKind::Float,
                    range,
                });
            }
        }
    }

    let classification = Classification {
        horizontal: (!metrics.is_empty()).then_some(0),
        vertical: (metrics.len() > 1).then_some(1),
        class: nominals.len().checked_sub(1),
        metrics,
        nominals,
        metric_lookup,
        nominal_lookup,
    };
    debug!(
        metrics = classification.metrics.len(),
        nominals = classification.nominals.len(),
        padding,
        "classified attributes"
    );
    Ok(classification)
}

// The extreme constants mark a bound that was never set.
fn resolve_integer(bound: i64) -> f64 {
    match bound {
        i64::MAX => f64::INFINITY,
        i64::MIN => f64::NEG_INFINITY,
        other => other as f64,
    }
}

fn resolve_float(bound: f64) -> f64 {
    if bound == f64::MAX {
        f64::INFINITY
    } else if bound == f64::MIN {
        f64::NEG_INFINITY
    } else {
        bound
    }
}

#[cfg(test)]
mod tests {
    use dmt_model::{Attribute, AttributeSet, Tuple, Value};

    use super::*;

    fn table() -> Table {
        let mut petals = Attribute::integer("petals");
        if let Some(bounds) = petals.integer_domain_mut() {
            bounds.widen(3);
        }
        let mut length = Attribute::float("length");
        if let Some(bounds) = length.float_domain_mut() {
            bounds.widen(1.0);
            bounds.widen(5.0);
        }
        let attributes = AttributeSet::from_attributes([
            Attribute::nominal_with("species", ["setosa", "virginica"]),
            petals,
            Attribute::nominal("empty"),
            length,
            Attribute::nominal_with("site", ["north"]),
            Attribute::float("unused"),
        ])
        .expect("attributes");
        let mut table = Table::new(attributes);
        table
            .push(Tuple::new(vec![
                Value::Nominal(0),
                Value::Integer(3),
                Value::Null,
                Value::Float(1.0),
                Value::Nominal(0),
                Value::Null,
            ]))
            .expect("push");
        table
    }

    #[test]
    fn range_rules() {
        assert_eq!(DisplayRange::from_bounds(0.0, 10.0, 0.1), DisplayRange {
            min: -1.0,
            max: 11.0
        });
        assert_eq!(DisplayRange::from_bounds(2.0, 2.0, 0.5), DisplayRange {
            min: 1.0,
            max: 3.0
        });
        assert_eq!(DisplayRange::from_bounds(3.0, 1.0, 0.0), DisplayRange::UNIT);
        assert_eq!(
            DisplayRange::from_bounds(f64::NEG_INFINITY, 1.0, 0.0),
            DisplayRange::UNIT
        );
    }

    #[test]
    fn partitions_attributes_and_picks_defaults() {
        let classification = classify(&table(), 0.0).expect("classify");
        let metric_names: Vec<&str> = classification
            .metrics()
            .iter()
            .map(|axis| axis.name.as_str())
            .collect();
        assert_eq!(metric_names, vec!["petals", "length", "unused"]);
        assert_eq!(classification.nominals().len(), 2);
        assert_eq!(classification.metric_of(3), Some(1));
        assert_eq!(classification.metric_of(0), None);
        assert_eq!(classification.nominal_of(2), None);
        assert_eq!(classification.nominal_of(4), Some(1));
        assert_eq!(classification.horizontal().map(|a| a.attribute), Some(1));
        assert_eq!(classification.vertical().map(|a| a.attribute), Some(3));
        assert_eq!(
            classification.class().map(|a| a.name.as_str()),
            Some("site")
        );
    }

    #[test]
    fn ranges_come_from_declared_bounds() {
        let classification = classify(&table(), 0.25).expect("classify");
        assert_eq!(classification.metrics()[2].range, DisplayRange::UNIT);
        assert_eq!(classification.metrics()[0].range, DisplayRange {
            min: 2.0,
            max: 4.0
        });
        assert_eq!(classification.metrics()[1].range, DisplayRange {
            min: 0.0,
            max: 6.0
        });
    }

    #[test]
    fn rejects_negative_padding() {
        let error = classify(&table(), -0.1).unwrap_err();
        assert!(matches!(error, TableError::MalformedValue { .. }));
    }
}

//! Weighted multiset of tuples over an attribute set.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeDomain, AttributeKind, FloatDomain};
use crate::attribute_set::AttributeSet;
use crate::error::{Result, TableError, reserve_error};
use crate::value::{Tuple, Value};

/// A table owns its attribute set and its tuples.
///
/// Every tuple holds exactly one value per attribute, each value fits its
/// attribute's kind, nominal indices are within their domain and weights are
/// non-negative. The attribute set can only change through methods that
/// rewrite the affected tuples in the same call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableParts")]
pub struct Table {
    attributes: AttributeSet,
    tuples: Vec<Tuple>,
}

/// Serialized form of a table, checked by [`Table::from_parts`] on the way in.
#[derive(Deserialize)]
struct TableParts {
    attributes: AttributeSet,
    tuples: Vec<Tuple>,
}

impl TryFrom<TableParts> for Table {
    type Error = TableError;

    fn try_from(parts: TableParts) -> Result<Self> {
        Self::from_parts(parts.attributes, parts.tuples)
    }
}

impl Table {
    /// An empty table over `attributes`.
    pub fn new(attributes: AttributeSet) -> Self {
        Self {
            attributes,
            tuples: Vec::new(),
        }
    }

    /// Assemble a table, validating every tuple against the attributes.
    pub fn from_parts(attributes: AttributeSet, tuples: Vec<Tuple>) -> Result<Self> {
        for (row, tuple) in tuples.iter().enumerate() {
            validate_tuple(&attributes, row, tuple)?;
        }
        Ok(Self { attributes, tuples })
    }

    pub fn into_parts(self) -> (AttributeSet, Vec<Tuple>) {
        (self.attributes, self.tuples)
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tuple> {
        self.tuples.iter()
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Sum of all tuple weights.
    pub fn total_weight(&self) -> f64 {
        self.tuples.iter().map(Tuple::weight).sum()
    }

    /// Append a tuple after validating it.
    pub fn push(&mut self, tuple: Tuple) -> Result<()> {
        validate_tuple(&self.attributes, self.tuples.len(), &tuple)?;
        self.tuples
            .try_reserve(1)
            .map_err(reserve_error("tuple storage"))?;
        self.tuples.push(tuple);
        Ok(())
    }

    /// Replace all tuples at once. On error the table is left untouched.
    pub fn replace_tuples(&mut self, tuples: Vec<Tuple>) -> Result<()> {
        for (row, tuple) in tuples.iter().enumerate() {
            validate_tuple(&self.attributes, row, tuple)?;
        }
        self.tuples = tuples;
        Ok(())
    }

    /// Sort the tuples in place with an unstable comparison sort.
    pub fn sort_unstable_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Tuple, &Tuple) -> Ordering,
    {
        self.tuples.sort_unstable_by(compare);
    }

    /// Label of a nominal value, if `value` is a nominal index of `attribute`.
    pub fn label(&self, attribute: usize, value: &Value) -> Option<&str> {
        let index = value.as_nominal()?;
        self.attributes
            .get(attribute)?
            .nominal_domain()?
            .label(index)
    }

    /// Values of one column together with the weight of their tuple.
    pub fn column(&self, attribute: usize) -> impl Iterator<Item = (Value, f64)> + '_ {
        self.tuples.iter().filter_map(move |tuple| {
            tuple
                .value(attribute)
                .map(|value| (*value, tuple.weight()))
        })
    }

    /// Reorder a nominal domain so that `order[new] = old`, then rewrite the
    /// stored index of every tuple. Returns the `old -> new` permutation.
    pub fn reorder_domain(&mut self, attribute: usize, order: &[usize]) -> Result<Vec<usize>> {
        let target = self.attribute_or_unknown(attribute)?;
        let name = target.name().to_string();
        let Some(domain) = target.nominal_domain() else {
            return Err(TableError::TypeMismatch {
                attribute: name,
                expected: "nominal",
                actual: target.kind(),
            });
        };
        if !is_permutation(order, domain.len()) {
            return Err(TableError::malformed(
                name,
                format!("{order:?}"),
                "domain order is not a permutation of the label indices",
            ));
        }
        let old_to_new = self
            .attributes
            .attribute_mut(attribute)
            .nominal_domain_mut()
            .map(|domain| domain.reorder(order))
            .unwrap_or_default();
        for tuple in &mut self.tuples {
            if let Value::Nominal(index) = &mut tuple.values_mut()[attribute] {
                *index = old_to_new[*index];
            }
        }
        Ok(old_to_new)
    }

    /// Turn an integer column into a float column.
    ///
    /// Returns `Ok(false)` if the column already holds floats.
    pub fn coerce_to_float(&mut self, attribute: usize) -> Result<bool> {
        let target = self.attribute_or_unknown(attribute)?;
        let bounds = match target.domain() {
            AttributeDomain::Float { .. } => return Ok(false),
            AttributeDomain::Integer { bounds } => bounds.to_float(),
            AttributeDomain::Nominal { .. } => {
                return Err(TableError::TypeMismatch {
                    attribute: target.name().to_string(),
                    expected: "numeric",
                    actual: AttributeKind::Nominal,
                });
            }
        };
        self.attributes
            .attribute_mut(attribute)
            .set_domain(AttributeDomain::Float { bounds });
        for tuple in &mut self.tuples {
            let cell = &mut tuple.values_mut()[attribute];
            if let Value::Integer(value) = *cell {
                *cell = Value::Float(value as f64);
            }
        }
        Ok(true)
    }

    /// Apply `map` to every non-null value of a float column and recompute
    /// the declared bounds from the results.
    pub fn map_float_column<F>(&mut self, attribute: usize, mut map: F) -> Result<()>
    where
        F: FnMut(f64) -> f64,
    {
        let target = self.attribute_or_unknown(attribute)?;
        let Some(old) = target.float_domain() else {
            return Err(TableError::TypeMismatch {
                attribute: target.name().to_string(),
                expected: "float",
                actual: target.kind(),
            });
        };
        let mut bounds = FloatDomain {
            null_sentinel: old.null_sentinel,
            precision: old.precision,
            ..FloatDomain::unbounded()
        };
        for tuple in &mut self.tuples {
            let cell = &mut tuple.values_mut()[attribute];
            if let Value::Float(value) = *cell {
                let mapped = map(value);
                bounds.widen(mapped);
                *cell = Value::Float(mapped);
            }
        }
        self.attributes
            .attribute_mut(attribute)
            .set_domain(AttributeDomain::Float { bounds });
        Ok(())
    }

    fn attribute_or_unknown(&self, attribute: usize) -> Result<&crate::Attribute> {
        self.attributes
            .get(attribute)
            .ok_or_else(|| TableError::unknown_attribute(format!("#{attribute}")))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Tuple;
    type IntoIter = std::slice::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.iter()
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        if index >= len || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

fn validate_tuple(attributes: &AttributeSet, row: usize, tuple: &Tuple) -> Result<()> {
    if tuple.len() != attributes.len() {
        return Err(TableError::RowLength {
            row,
            expected: attributes.len(),
            actual: tuple.len(),
        });
    }
    let weight = tuple.weight();
    if !(weight >= 0.0 && weight.is_finite()) {
        return Err(TableError::malformed(
            "weight",
            weight.to_string(),
            format!("row {row}: weight must be a non-negative number"),
        ));
    }
    for (attribute, value) in attributes.iter().zip(tuple.values()) {
        if !value.fits(attribute.kind()) {
            return Err(TableError::malformed(
                attribute.name(),
                format!("{value:?}"),
                format!("row {row}: value does not fit a {} column", attribute.kind()),
            ));
        }
        if let (Value::Nominal(index), Some(domain)) = (value, attribute.nominal_domain())
            && *index >= domain.len()
        {
            return Err(TableError::malformed(
                attribute.name(),
                index.to_string(),
                format!("row {row}: label index out of range"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attribute;

    fn colors() -> Table {
        let attributes = AttributeSet::from_attributes([
            Attribute::nominal_with("color", ["red", "blue", "green"]),
            Attribute::integer("size"),
        ])
        .expect("attributes");
        Table::from_parts(
            attributes,
            vec![
                Tuple::new(vec![Value::Nominal(0), Value::Integer(3)]),
                Tuple::new(vec![Value::Nominal(2), Value::Null]),
                Tuple::new(vec![Value::Nominal(1), Value::Integer(1)]),
            ],
        )
        .expect("table")
    }

    #[test]
    fn push_rejects_short_rows() {
        let mut table = colors();
        let error = table.push(Tuple::new(vec![Value::Nominal(0)])).unwrap_err();
        assert_eq!(
            error,
            TableError::RowLength {
                row: 3,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn push_rejects_negative_weight() {
        let mut table = colors();
        let tuple = Tuple::weighted(vec![Value::Nominal(0), Value::Null], -1.0);
        assert!(matches!(
            table.push(tuple),
            Err(TableError::MalformedValue { .. })
        ));
    }

    #[test]
    fn push_rejects_out_of_range_label() {
        let mut table = colors();
        let tuple = Tuple::new(vec![Value::Nominal(7), Value::Null]);
        assert!(matches!(
            table.push(tuple),
            Err(TableError::MalformedValue { .. })
        ));
    }

    #[test]
    fn reorder_domain_rewrites_tuples() {
        let mut table = colors();
        // blue, green, red
        let old_to_new = table.reorder_domain(0, &[1, 2, 0]).expect("reorder");
        assert_eq!(old_to_new, vec![2, 0, 1]);
        let labels: Vec<&str> = table
            .iter()
            .map(|tuple| table.label(0, &tuple.values()[0]).unwrap_or("?"))
            .collect();
        assert_eq!(labels, vec!["red", "green", "blue"]);
    }

    #[test]
    fn reorder_domain_rejects_metric_attribute() {
        let mut table = colors();
        assert!(matches!(
            table.reorder_domain(1, &[]),
            Err(TableError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn coerce_to_float_converts_values_and_bounds() {
        let mut table = colors();
        assert!(table.coerce_to_float(1).expect("coerce"));
        assert_eq!(table.tuples()[0].values()[1], Value::Float(3.0));
        assert_eq!(table.tuples()[1].values()[1], Value::Null);
        assert_eq!(
            table.attributes().get(1).map(|a| a.kind()),
            Some(AttributeKind::Float)
        );
        assert!(!table.coerce_to_float(1).expect("already float"));
    }

    #[test]
    fn map_float_column_recomputes_bounds() {
        let mut table = colors();
        table.coerce_to_float(1).expect("coerce");
        table.map_float_column(1, |x| x * 10.0).expect("map");
        let bounds = table
            .attributes()
            .get(1)
            .and_then(|a| a.float_domain())
            .copied()
            .expect("float bounds");
        assert_eq!((bounds.min, bounds.max), (10.0, 30.0));
    }
}

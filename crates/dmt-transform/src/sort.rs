//! Multi-key sorting of table tuples.

use std::cmp::Ordering;

use dmt_model::{AttributeSet, Result, SortDirection, Table, TableError, Tuple};
use tracing::debug;

/// A comparison strategy over whole tuples.
pub trait TupleOrder {
    fn compare(&self, left: &Tuple, right: &Tuple) -> Ordering;
}

impl<F> TupleOrder for F
where
    F: Fn(&Tuple, &Tuple) -> Ordering,
{
    fn compare(&self, left: &Tuple, right: &Tuple) -> Ordering {
        self(left, right)
    }
}

/// Lexicographic order over a list of key attributes.
///
/// Nominal values compare by domain index, metric values numerically, and
/// null sorts before any real value. Ties cascade to the next key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOrder {
    keys: Vec<usize>,
    direction: SortDirection,
}

impl KeyOrder {
    /// Resolve key names against `attributes`; no names means every
    /// attribute from left to right.
    pub fn new<S: AsRef<str>>(
        attributes: &AttributeSet,
        names: &[S],
        direction: SortDirection,
    ) -> Result<Self> {
        let keys = if names.is_empty() {
            (0..attributes.len()).collect()
        } else {
            attributes.resolve(names)?
        };
        Ok(Self { keys, direction })
    }

    /// Use attribute indices directly; every index must exist.
    pub fn from_indices(
        attributes: &AttributeSet,
        keys: Vec<usize>,
        direction: SortDirection,
    ) -> Result<Self> {
        if let Some(&missing) = keys.iter().find(|&&key| key >= attributes.len()) {
            return Err(TableError::unknown_attribute(format!("#{missing}")));
        }
        Ok(Self { keys, direction })
    }

    pub fn keys(&self) -> &[usize] {
        &self.keys
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl TupleOrder for KeyOrder {
    fn compare(&self, left: &Tuple, right: &Tuple) -> Ordering {
        let ordering = self
            .keys
            .iter()
            .map(|&key| left.values()[key].compare(&right.values()[key]))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal);
        if self.direction.multiplier() < 0 {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Sort a table by the named key attributes.
///
/// Unknown names fail before the table is touched.
pub fn sort_table<S: AsRef<str>>(
    table: &mut Table,
    keys: &[S],
    direction: SortDirection,
) -> Result<()> {
    let order = KeyOrder::new(table.attributes(), keys, direction)?;
    debug!(keys = ?order.keys(), ?direction, rows = table.len(), "sorting table");
    sort_table_with(table, &order);
    Ok(())
}

/// Sort a table with any tuple order. Equal tuples may be reordered.
pub fn sort_table_with(table: &mut Table, order: &impl TupleOrder) {
    table.sort_unstable_by(|left, right| order.compare(left, right));
}

#[cfg(test)]
mod tests {
    use dmt_model::{Attribute, Value};

    use super::*;

    fn table() -> Table {
        let attributes = AttributeSet::from_attributes([
            Attribute::nominal_with("grade", ["low", "high"]),
            Attribute::float("score"),
        ])
        .expect("attributes");
        Table::from_parts(
            attributes,
            vec![
                Tuple::new(vec![Value::Nominal(1), Value::Float(2.0)]),
                Tuple::new(vec![Value::Nominal(0), Value::Float(5.0)]),
                Tuple::new(vec![Value::Nominal(1), Value::Null]),
                Tuple::new(vec![Value::Nominal(0), Value::Float(-1.0)]),
            ],
        )
        .expect("table")
    }

    fn scores(table: &Table) -> Vec<Value> {
        table.iter().map(|tuple| tuple.values()[1]).collect()
    }

    #[test]
    fn sorts_by_domain_index_then_value() {
        let mut table = table();
        sort_table::<&str>(&mut table, &[], SortDirection::Ascending).expect("sort");
        assert_eq!(
            scores(&table),
            vec![
                Value::Float(-1.0),
                Value::Float(5.0),
                Value::Null,
                Value::Float(2.0)
            ]
        );
    }

    #[test]
    fn descending_reverses_keys() {
        let mut table = table();
        sort_table(&mut table, &["score"], SortDirection::Descending).expect("sort");
        assert_eq!(
            scores(&table),
            vec![
                Value::Float(5.0),
                Value::Float(2.0),
                Value::Float(-1.0),
                Value::Null
            ]
        );
    }

    #[test]
    fn from_indices_rejects_out_of_range_keys() {
        let table = table();
        let error =
            KeyOrder::from_indices(table.attributes(), vec![0, 2], SortDirection::Ascending)
                .unwrap_err();
        assert_eq!(error, TableError::unknown_attribute("#2"));
    }
}

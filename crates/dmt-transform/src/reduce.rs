//! Collapse duplicate tuples into weighted distinct tuples.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use dmt_model::error::reserve_error;
use dmt_model::{Result, Table, Tuple, Value};
use serde::Serialize;
use tracing::debug;

/// Counts reported by a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReduceSummary {
    pub input_rows: usize,
    pub output_rows: usize,
    pub total_weight: f64,
}

/// Merge tuples with identical value vectors, summing their weights.
///
/// The output keeps the order in which each distinct tuple first occurs.
pub fn reduce_tuples(tuples: &[Tuple]) -> Result<Vec<Tuple>> {
    let mut index: HashMap<&[Value], usize> = HashMap::new();
    index
        .try_reserve(tuples.len())
        .map_err(reserve_error("reduction index"))?;
    let mut distinct: Vec<(&[Value], f64)> = Vec::new();
    distinct
        .try_reserve(tuples.len())
        .map_err(reserve_error("reduction buffer"))?;

    for tuple in tuples {
        match index.entry(tuple.values()) {
            Entry::Occupied(entry) => distinct[*entry.get()].1 += tuple.weight(),
            Entry::Vacant(entry) => {
                entry.insert(distinct.len());
                distinct.push((tuple.values(), tuple.weight()));
            }
        }
    }

    let mut reduced = Vec::new();
    reduced
        .try_reserve_exact(distinct.len())
        .map_err(reserve_error("reduced tuples"))?;
    reduced.extend(
        distinct
            .into_iter()
            .map(|(values, weight)| Tuple::weighted(values.to_vec(), weight)),
    );
    Ok(reduced)
}

/// Reduce a table in place.
///
/// The reduced tuples are only swapped in once they are complete; on error
/// the table keeps its original tuples.
pub fn reduce(table: &mut Table) -> Result<ReduceSummary> {
    let input_rows = table.len();
    let reduced = reduce_tuples(table.tuples())?;
    table.replace_tuples(reduced)?;
    let summary = ReduceSummary {
        input_rows,
        output_rows: table.len(),
        total_weight: table.total_weight(),
    };
    debug!(
        input_rows = summary.input_rows,
        output_rows = summary.output_rows,
        total_weight = summary.total_weight,
        "reduced table"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_duplicates_in_first_occurrence_order() {
        let tuples = vec![
            Tuple::new(vec![Value::Integer(2)]),
            Tuple::weighted(vec![Value::Integer(1)], 0.5),
            Tuple::weighted(vec![Value::Integer(2)], 3.0),
            Tuple::new(vec![Value::Null]),
            Tuple::new(vec![Value::Null]),
        ];
        let reduced = reduce_tuples(&tuples).expect("reduce");
        assert_eq!(
            reduced,
            vec![
                Tuple::weighted(vec![Value::Integer(2)], 4.0),
                Tuple::weighted(vec![Value::Integer(1)], 0.5),
                Tuple::weighted(vec![Value::Null], 2.0),
            ]
        );
    }

    #[test]
    fn empty_input_reduces_to_nothing() {
        assert!(reduce_tuples(&[]).expect("reduce").is_empty());
    }
}

//! Column projection and row-wise merging of tables.

use dmt_model::error::reserve_error;
use dmt_model::{
    Attribute, AttributeDomain, AttributeKind, AttributeSet, Result, Table, TableError, Tuple,
    Value,
};
use tracing::{debug, info};

/// Keep only the named columns, in the order given.
///
/// Unknown names fail before anything is copied. Domains are carried over
/// unchanged, so nominal labels that no longer occur stay in the domain.
pub fn project<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Table> {
    let columns = table.attributes().resolve(names)?;
    let attributes = AttributeSet::from_attributes(
        columns
            .iter()
            .filter_map(|&column| table.attributes().get(column).cloned()),
    )?;

    let mut tuples = Vec::new();
    tuples
        .try_reserve_exact(table.len())
        .map_err(reserve_error("projected tuples"))?;
    for tuple in table {
        let values = columns.iter().map(|&column| tuple.values()[column]).collect();
        tuples.push(Tuple::weighted(values, tuple.weight()));
    }
    debug!(columns = columns.len(), rows = tuples.len(), "projected table");
    Table::from_parts(attributes, tuples)
}

/// How one column of an appended table joins the merged column.
#[derive(Debug, Clone, PartialEq)]
enum ColumnMerge {
    Same,
    /// Nominal indices of the appended table mapped into the merged domain.
    Labels(Vec<usize>),
    /// The merged column is integer and must become float.
    PromoteMerged,
    /// The appended column is integer and its values become floats.
    PromoteAppended,
}

/// Concatenate tables whose attributes have the same names in the same order.
///
/// The first table's domains are the base: labels of later tables are
/// appended to them, and an integer column merged with a float column
/// becomes a float column. Merging nothing yields an empty table.
pub fn merge(tables: impl IntoIterator<Item = Table>) -> Result<Table> {
    let mut tables = tables.into_iter();
    let Some(first) = tables.next() else {
        return Ok(Table::new(AttributeSet::new()));
    };
    let (mut attributes, mut tuples) = first.into_parts();
    let mut merged = 1;

    for other in tables {
        let mut plan = plan_columns(&attributes, other.attributes())?;
        apply_domains(&mut attributes, other.attributes(), &mut plan)?;

        let promote: Vec<usize> = plan
            .iter()
            .enumerate()
            .filter(|(_, column)| **column == ColumnMerge::PromoteMerged)
            .map(|(index, _)| index)
            .collect();
        if !promote.is_empty() {
            tuples = tuples
                .into_iter()
                .map(|tuple| {
                    let weight = tuple.weight();
                    let mut values = tuple.into_values();
                    for &column in &promote {
                        values[column] = to_float(values[column]);
                    }
                    Tuple::weighted(values, weight)
                })
                .collect();
        }

        tuples
            .try_reserve(other.len())
            .map_err(reserve_error("merged tuples"))?;
        for tuple in &other {
            let values = tuple
                .values()
                .iter()
                .zip(&plan)
                .map(|(&value, column)| match (column, value) {
                    (ColumnMerge::Labels(remap), Value::Nominal(index)) => {
                        Value::Nominal(remap[index])
                    }
                    (ColumnMerge::PromoteAppended, value) => to_float(value),
                    (_, value) => value,
                })
                .collect();
            tuples.push(Tuple::weighted(values, tuple.weight()));
        }
        merged += 1;
    }

    info!(tables = merged, rows = tuples.len(), "merged tables");
    Table::from_parts(attributes, tuples)
}

fn to_float(value: Value) -> Value {
    match value {
        Value::Integer(value) => Value::Float(value as f64),
        other => other,
    }
}

/// Check that `other` lines up with `base` and decide how each column merges.
fn plan_columns(base: &AttributeSet, other: &AttributeSet) -> Result<Vec<ColumnMerge>> {
    if let Some(extra) = other.iter().nth(base.len()) {
        return Err(TableError::unknown_attribute(extra.name()));
    }
    if let Some(missing) = base.iter().nth(other.len()) {
        return Err(TableError::unknown_attribute(missing.name()));
    }

    let mut plan = Vec::with_capacity(base.len());
    for (left, right) in base.iter().zip(other) {
        if left.name() != right.name() {
            return Err(TableError::unknown_attribute(right.name()));
        }
        let column = match (left.kind(), right.kind()) {
            (AttributeKind::Nominal, AttributeKind::Nominal) => ColumnMerge::Labels(Vec::new()),
            (AttributeKind::Integer, AttributeKind::Float) => ColumnMerge::PromoteMerged,
            (AttributeKind::Float, AttributeKind::Integer) => ColumnMerge::PromoteAppended,
            (left_kind, right_kind) if left_kind == right_kind => ColumnMerge::Same,
            (left_kind, right_kind) => {
                return Err(TableError::TypeMismatch {
                    attribute: right.name().to_string(),
                    expected: left_kind.as_str(),
                    actual: right_kind,
                });
            }
        };
        plan.push(column);
    }
    Ok(plan)
}

/// Extend the merged domains with those of `other`, filling in label maps.
fn apply_domains(
    attributes: &mut AttributeSet,
    other: &AttributeSet,
    plan: &mut [ColumnMerge],
) -> Result<()> {
    for (index, (column, right)) in plan.iter_mut().zip(other).enumerate() {
        let left = attributes
            .get_mut(index)
            .ok_or_else(|| TableError::unknown_attribute(right.name()))?;
        match (left.domain(), right.domain()) {
            (AttributeDomain::Nominal { .. }, AttributeDomain::Nominal { values }) => {
                if let Some(domain) = left.nominal_domain_mut() {
                    let remap = values.iter().map(|label| domain.insert(label)).collect();
                    *column = ColumnMerge::Labels(remap);
                }
            }
            (AttributeDomain::Integer { bounds: mine }, AttributeDomain::Integer { bounds }) => {
                let mut widened = *mine;
                if bounds.is_bounded() {
                    widened.widen(bounds.min);
                    widened.widen(bounds.max);
                }
                *left = Attribute::new(left.name(), AttributeDomain::Integer { bounds: widened });
            }
            (AttributeDomain::Integer { bounds: mine }, AttributeDomain::Float { bounds }) => {
                let mut widened = mine.to_float();
                if bounds.is_bounded() {
                    widened.widen(bounds.min);
                    widened.widen(bounds.max);
                }
                *left = Attribute::new(left.name(), AttributeDomain::Float { bounds: widened });
            }
            (AttributeDomain::Float { bounds: mine }, right_domain) => {
                let incoming = match right_domain {
                    AttributeDomain::Integer { bounds } => bounds.to_float(),
                    AttributeDomain::Float { bounds } => *bounds,
                    AttributeDomain::Nominal { .. } => continue,
                };
                let mut widened = *mine;
                if incoming.is_bounded() {
                    widened.widen(incoming.min);
                    widened.widen(incoming.max);
                }
                *left = Attribute::new(left.name(), AttributeDomain::Float { bounds: widened });
            }
            _ => {}
        }
    }
    Ok(())
}

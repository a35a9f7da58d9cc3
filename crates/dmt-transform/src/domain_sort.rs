//! Canonical ordering of nominal domains.
//!
//! Sorting a domain computes a new label order from a comparator and then
//! rewrites every tuple's stored index for that attribute in one pass.

use std::cmp::Ordering;

use dmt_model::{Result, Table, TableError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A total order over domain labels.
pub trait LabelOrder {
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

impl<F> LabelOrder for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, left: &str, right: &str) -> Ordering {
        self(left, right)
    }
}

/// Built-in label comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelComparator {
    /// Byte-wise comparison of the labels.
    #[default]
    Lexicographic,
    /// Leading integers compared numerically, then the full labels byte-wise.
    Numeric,
}

impl LabelOrder for LabelComparator {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        match self {
            LabelComparator::Lexicographic => compare_lexicographic(left, right),
            LabelComparator::Numeric => compare_numeric(left, right),
        }
    }
}

pub fn compare_lexicographic(left: &str, right: &str) -> Ordering {
    left.as_bytes().cmp(right.as_bytes())
}

/// Compare the leading integers of two labels, falling back to byte-wise
/// comparison of the full labels when either has none or both are equal.
pub fn compare_numeric(left: &str, right: &str) -> Ordering {
    match (leading_integer(left), leading_integer(right)) {
        (Some(l), Some(r)) => l
            .compare(&r)
            .then_with(|| compare_lexicographic(left, right)),
        _ => compare_lexicographic(left, right),
    }
}

/// Sign and significant digits of a label's leading integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LeadingInteger<'a> {
    negative: bool,
    digits: &'a str,
}

impl LeadingInteger<'_> {
    // Digit runs of any length: fewer significant digits is smaller.
    fn compare(&self, other: &Self) -> Ordering {
        let magnitude = self
            .digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(other.digits));
        match (self.negative, other.negative) {
            (false, false) => magnitude,
            (true, true) => magnitude.reverse(),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

/// Leading integer in `strtol` form: optional blanks, an optional sign, then
/// at least one digit.
fn leading_integer(label: &str) -> Option<LeadingInteger<'_>> {
    let label = label.trim_start_matches([' ', '\t']);
    let (negative, rest) = if let Some(rest) = label.strip_prefix('-') {
        (true, rest)
    } else {
        (false, label.strip_prefix('+').unwrap_or(label))
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let digits = rest[..end].trim_start_matches('0');
    Some(LeadingInteger {
        negative: negative && !digits.is_empty(),
        digits,
    })
}

/// Sort the domain of one nominal attribute and remap all tuples.
///
/// Returns the `old index -> new index` permutation.
pub fn sort_domain(
    table: &mut Table,
    attribute: usize,
    order: &impl LabelOrder,
) -> Result<Vec<usize>> {
    let target = table
        .attributes()
        .get(attribute)
        .ok_or_else(|| TableError::unknown_attribute(format!("#{attribute}")))?;
    let Some(domain) = target.nominal_domain() else {
        return Err(TableError::TypeMismatch {
            attribute: target.name().to_string(),
            expected: "nominal",
            actual: target.kind(),
        });
    };
    let labels = domain.labels();
    let mut new_order: Vec<usize> = (0..labels.len()).collect();
    new_order.sort_by(|&l, &r| order.compare(&labels[l], &labels[r]));
    debug!(
        attribute = %target.name(),
        labels = labels.len(),
        "sorting nominal domain"
    );
    table.reorder_domain(attribute, &new_order)
}

/// Sort the domain of the named nominal attribute.
pub fn sort_domain_by_name(
    table: &mut Table,
    name: &str,
    order: &impl LabelOrder,
) -> Result<Vec<usize>> {
    let attribute = table
        .attributes()
        .index_of(name)
        .ok_or_else(|| TableError::unknown_attribute(name))?;
    sort_domain(table, attribute, order)
}

/// Sort every nominal domain of the table, skipping metric attributes.
///
/// Returns the number of domains sorted.
pub fn sort_all_domains(table: &mut Table, order: &impl LabelOrder) -> Result<usize> {
    let nominal = table
        .attributes()
        .indices_of_kind(dmt_model::AttributeKind::Nominal);
    for &attribute in &nominal {
        sort_domain(table, attribute, order)?;
    }
    Ok(nominal.len())
}

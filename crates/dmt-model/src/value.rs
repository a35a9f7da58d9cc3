//! Cell values and weighted tuples.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeKind;

/// A single cell of a tuple.
///
/// Equality and hashing are structural: floats compare by bit pattern, with
/// `-0.0` folded onto `0.0`, so value vectors can be used as map keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Index into the attribute's nominal domain.
    Nominal(usize),
    Integer(i64),
    Float(f64),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The kind this value belongs to, or `None` for `Null`.
    pub fn kind(&self) -> Option<AttributeKind> {
        match self {
            Value::Nominal(_) => Some(AttributeKind::Nominal),
            Value::Integer(_) => Some(AttributeKind::Integer),
            Value::Float(_) => Some(AttributeKind::Float),
            Value::Null => None,
        }
    }

    /// True if the value may be stored in an attribute of `kind`.
    pub fn fits(&self, kind: AttributeKind) -> bool {
        self.kind().is_none_or(|own| own == kind)
    }

    pub fn as_nominal(&self) -> Option<usize> {
        match self {
            Value::Nominal(index) => Some(*index),
            _ => None,
        }
    }

    /// Numeric view of an integer or float value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Compare two values of the same column.
    ///
    /// `Null` sorts before every other value. Nominal values compare by
    /// domain index, metric values numerically.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Nominal(left), Value::Nominal(right)) => left.cmp(right),
            (Value::Integer(left), Value::Integer(right)) => left.cmp(right),
            (Value::Float(left), Value::Float(right)) => left.total_cmp(right),
            (left, right) => match (left.as_f64(), right.as_f64()) {
                (Some(left), Some(right)) => left.total_cmp(&right),
                _ => discriminant_rank(left).cmp(&discriminant_rank(right)),
            },
        }
    }
}

fn discriminant_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Nominal(_) => 1,
        Value::Integer(_) => 2,
        Value::Float(_) => 3,
    }
}

fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nominal(left), Value::Nominal(right)) => left == right,
            (Value::Integer(left), Value::Integer(right)) => left == right,
            (Value::Float(left), Value::Float(right)) => float_bits(*left) == float_bits(*right),
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant_rank(self).hash(state);
        match self {
            Value::Nominal(index) => index.hash(state),
            Value::Integer(value) => value.hash(state),
            Value::Float(value) => float_bits(*value).hash(state),
            Value::Null => {}
        }
    }
}

/// A row of a table: one value per attribute plus a non-negative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuple {
    values: Vec<Value>,
    weight: f64,
}

impl Tuple {
    /// A tuple with weight 1.
    pub fn new(values: Vec<Value>) -> Self {
        Self::weighted(values, 1.0)
    }

    pub fn weighted(values: Vec<Value>, weight: f64) -> Self {
        Self { values, weight }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn null_sorts_first() {
        assert_eq!(Value::Null.compare(&Value::Integer(i64::MIN)), Ordering::Less);
        assert_eq!(Value::Float(-1e300).compare(&Value::Null), Ordering::Greater);
        assert_eq!(Value::Null.compare(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn signed_zero_is_one_key() {
        let mut keys = HashSet::new();
        keys.insert(vec![Value::Float(0.0), Value::Nominal(1)]);
        keys.insert(vec![Value::Float(-0.0), Value::Nominal(1)]);
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn null_fits_every_kind() {
        assert!(Value::Null.fits(AttributeKind::Nominal));
        assert!(Value::Integer(3).fits(AttributeKind::Integer));
        assert!(!Value::Integer(3).fits(AttributeKind::Float));
    }
}

//! Attributes and their value domains.
//!
//! An attribute is either nominal (an enumerated set of labels with stable
//! indices) or metric (an integer or floating-point interval). Tuples store
//! nominal values as indices into the label list, so the order of labels is
//! only ever changed through [`crate::Table`], which rewrites the tuples in
//! the same call.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of significant digits used to render floating-point values.
pub const DEFAULT_PRECISION: usize = 6;

/// The type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Nominal,
    Integer,
    Float,
}

impl AttributeKind {
    /// Returns true for integer and floating-point attributes.
    pub fn is_numeric(self) -> bool {
        matches!(self, AttributeKind::Integer | AttributeKind::Float)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Nominal => "nominal",
            AttributeKind::Integer => "integer",
            AttributeKind::Float => "float",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of distinct labels for a nominal attribute.
///
/// A label keeps its index until the domain is explicitly reordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NominalDomain {
    labels: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl NominalDomain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label stored at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Index of `label`, if it is part of the domain.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    /// Add a label, returning its index. Existing labels keep their index.
    pub fn insert(&mut self, label: &str) -> usize {
        if let Some(index) = self.lookup.get(label) {
            return *index;
        }
        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.lookup.insert(label.to_string(), index);
        index
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Reorder labels so that `order[new] = old`, returning the `old -> new` map.
    ///
    /// `order` must be a permutation of `0..len()`.
    pub(crate) fn reorder(&mut self, order: &[usize]) -> Vec<usize> {
        let mut old_to_new = vec![0; self.labels.len()];
        let mut labels = Vec::with_capacity(self.labels.len());
        for (new, &old) in order.iter().enumerate() {
            old_to_new[old] = new;
            labels.push(std::mem::take(&mut self.labels[old]));
        }
        self.labels = labels;
        self.rebuild_lookup();
        old_to_new
    }

    fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        for (index, label) in self.labels.iter().enumerate() {
            self.lookup.insert(label.clone(), index);
        }
    }
}

impl PartialEq for NominalDomain {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl From<Vec<String>> for NominalDomain {
    fn from(labels: Vec<String>) -> Self {
        let mut domain = NominalDomain::new();
        for label in &labels {
            domain.insert(label);
        }
        domain
    }
}

impl From<NominalDomain> for Vec<String> {
    fn from(domain: NominalDomain) -> Self {
        domain.labels
    }
}

/// Interval domain of a metric attribute.
///
/// Bounds start out "unbounded": `min` holds the type's largest value and
/// `max` the smallest, and both widen as values are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericDomain<T> {
    pub min: T,
    pub max: T,
    /// Raw value that stands for a missing value when reading.
    pub null_sentinel: Option<T>,
    /// Significant digits used when rendering values.
    pub precision: usize,
}

pub type IntegerDomain = NumericDomain<i64>;
pub type FloatDomain = NumericDomain<f64>;

impl NumericDomain<i64> {
    pub fn unbounded() -> Self {
        Self {
            min: i64::MAX,
            max: i64::MIN,
            null_sentinel: None,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn widen(&mut self, value: i64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// True once at least one value has been recorded.
    pub fn is_bounded(&self) -> bool {
        self.min <= self.max
    }

    /// The same bounds as a floating-point domain.
    pub fn to_float(&self) -> FloatDomain {
        let convert = |value: i64| match value {
            i64::MAX => f64::MAX,
            i64::MIN => f64::MIN,
            other => other as f64,
        };
        FloatDomain {
            min: convert(self.min),
            max: convert(self.max),
            null_sentinel: self.null_sentinel.map(|value| value as f64),
            precision: self.precision,
        }
    }
}

impl Default for NumericDomain<i64> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl NumericDomain<f64> {
    pub fn unbounded() -> Self {
        Self {
            min: f64::MAX,
            max: f64::MIN,
            null_sentinel: None,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Record a value; NaN never widens the bounds.
    pub fn widen(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn is_bounded(&self) -> bool {
        self.min <= self.max
    }

    /// Forget the recorded bounds, keeping sentinel and precision.
    pub fn reset_bounds(&mut self) {
        self.min = f64::MAX;
        self.max = f64::MIN;
    }
}

impl Default for NumericDomain<f64> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Value domain of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeDomain {
    Nominal { values: NominalDomain },
    Integer { bounds: IntegerDomain },
    Float { bounds: FloatDomain },
}

impl AttributeDomain {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeDomain::Nominal { .. } => AttributeKind::Nominal,
            AttributeDomain::Integer { .. } => AttributeKind::Integer,
            AttributeDomain::Float { .. } => AttributeKind::Float,
        }
    }

    /// An empty domain of the given kind.
    pub fn empty(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Nominal => AttributeDomain::Nominal {
                values: NominalDomain::new(),
            },
            AttributeKind::Integer => AttributeDomain::Integer {
                bounds: IntegerDomain::unbounded(),
            },
            AttributeKind::Float => AttributeDomain::Float {
                bounds: FloatDomain::unbounded(),
            },
        }
    }
}

/// A named attribute with its domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    domain: AttributeDomain,
}

impl Attribute {
    pub fn new(name: impl Into<String>, domain: AttributeDomain) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    pub fn nominal(name: impl Into<String>) -> Self {
        Self::new(name, AttributeDomain::empty(AttributeKind::Nominal))
    }

    /// A nominal attribute with the given labels, in order.
    pub fn nominal_with<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = NominalDomain::new();
        for label in labels {
            values.insert(label.as_ref());
        }
        Self::new(name, AttributeDomain::Nominal { values })
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, AttributeDomain::empty(AttributeKind::Integer))
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, AttributeDomain::empty(AttributeKind::Float))
    }

    pub fn of_kind(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self::new(name, AttributeDomain::empty(kind))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.domain.kind()
    }

    pub fn domain(&self) -> &AttributeDomain {
        &self.domain
    }

    pub fn nominal_domain(&self) -> Option<&NominalDomain> {
        match &self.domain {
            AttributeDomain::Nominal { values } => Some(values),
            _ => None,
        }
    }

    /// Mutable access to the labels; only appending is possible from outside.
    pub fn nominal_domain_mut(&mut self) -> Option<&mut NominalDomain> {
        match &mut self.domain {
            AttributeDomain::Nominal { values } => Some(values),
            _ => None,
        }
    }

    pub fn integer_domain(&self) -> Option<&IntegerDomain> {
        match &self.domain {
            AttributeDomain::Integer { bounds } => Some(bounds),
            _ => None,
        }
    }

    pub fn integer_domain_mut(&mut self) -> Option<&mut IntegerDomain> {
        match &mut self.domain {
            AttributeDomain::Integer { bounds } => Some(bounds),
            _ => None,
        }
    }

    pub fn float_domain(&self) -> Option<&FloatDomain> {
        match &self.domain {
            AttributeDomain::Float { bounds } => Some(bounds),
            _ => None,
        }
    }

    pub fn float_domain_mut(&mut self) -> Option<&mut FloatDomain> {
        match &mut self.domain {
            AttributeDomain::Float { bounds } => Some(bounds),
            _ => None,
        }
    }

    /// Display precision of a metric attribute.
    pub fn precision(&self) -> Option<usize> {
        match &self.domain {
            AttributeDomain::Nominal { .. } => None,
            AttributeDomain::Integer { bounds } => Some(bounds.precision),
            AttributeDomain::Float { bounds } => Some(bounds.precision),
        }
    }

    pub(crate) fn set_domain(&mut self, domain: AttributeDomain) {
        self.domain = domain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_existing_index() {
        let mut domain = NominalDomain::new();
        assert_eq!(domain.insert("b"), 0);
        assert_eq!(domain.insert("a"), 1);
        assert_eq!(domain.insert("b"), 0);
        assert_eq!(domain.len(), 2);
    }

    #[test]
    fn reorder_returns_inverse_permutation() {
        let mut domain = NominalDomain::from(vec!["c".to_string(), "a".into(), "b".into()]);
        let old_to_new = domain.reorder(&[1, 2, 0]);
        assert_eq!(domain.labels(), ["a", "b", "c"]);
        assert_eq!(old_to_new, vec![2, 0, 1]);
        assert_eq!(domain.index_of("c"), Some(2));
    }

    #[test]
    fn integer_bounds_widen_from_unbounded() {
        let mut bounds = IntegerDomain::unbounded();
        assert!(!bounds.is_bounded());
        bounds.widen(4);
        bounds.widen(-2);
        assert_eq!((bounds.min, bounds.max), (-2, 4));
    }

    #[test]
    fn unbounded_integer_converts_to_float_extremes() {
        let bounds = IntegerDomain::unbounded().to_float();
        assert_eq!(bounds.min, f64::MAX);
        assert_eq!(bounds.max, f64::MIN);
    }

    #[test]
    fn nominal_domain_serializes_as_label_list() {
        let attribute = Attribute::nominal_with("color", ["red", "blue"]);
        let json = serde_json::to_string(&attribute).expect("serialize attribute");
        assert!(json.contains(r#"["red","blue"]"#));
        let round: Attribute = serde_json::from_str(&json).expect("deserialize attribute");
        assert_eq!(round.nominal_domain().and_then(|d| d.index_of("blue")), Some(1));
    }
}

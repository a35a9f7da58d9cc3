//! Ordered, name-unique collection of attributes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeKind};
use crate::error::{Result, TableError};

/// The attributes shared by every tuple of a table.
///
/// The index of an attribute is its position in the set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
    by_name: HashMap<String, usize>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from attributes, rejecting duplicate names.
    pub fn from_attributes(attributes: impl IntoIterator<Item = Attribute>) -> Result<Self> {
        let mut set = Self::new();
        for attribute in attributes {
            set.push(attribute)?;
        }
        Ok(set)
    }

    /// Append an attribute and return its index.
    pub fn push(&mut self, attribute: Attribute) -> Result<usize> {
        if self.by_name.contains_key(attribute.name()) {
            return Err(TableError::DuplicateAttribute {
                name: attribute.name().to_string(),
            });
        }
        let index = self.attributes.len();
        self.by_name.insert(attribute.name().to_string(), index);
        self.attributes.push(attribute);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    /// Mutable access for building a set before it is attached to a table.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Attribute> {
        self.attributes.get_mut(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look up an attribute by name.
    pub fn by_name(&self, name: &str) -> Option<&Attribute> {
        self.index_of(name).and_then(|index| self.attributes.get(index))
    }

    /// Resolve names to indices, failing on the first unknown name.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.index_of(name)
                    .ok_or_else(|| TableError::unknown_attribute(name))
            })
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(Attribute::name)
    }

    /// Indices of the attributes of the given kind.
    pub fn indices_of_kind(&self, kind: AttributeKind) -> Vec<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, attribute)| attribute.kind() == kind)
            .map(|(index, _)| index)
            .collect()
    }

    pub(crate) fn attribute_mut(&mut self, index: usize) -> &mut Attribute {
        &mut self.attributes[index]
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl TryFrom<Vec<Attribute>> for AttributeSet {
    type Error = TableError;

    fn try_from(attributes: Vec<Attribute>) -> Result<Self> {
        Self::from_attributes(attributes)
    }
}

impl From<AttributeSet> for Vec<Attribute> {
    fn from(set: AttributeSet) -> Self {
        set.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let mut set = AttributeSet::new();
        set.push(Attribute::nominal("a")).expect("first push");
        let error = set.push(Attribute::integer("a")).unwrap_err();
        assert_eq!(
            error,
            TableError::DuplicateAttribute {
                name: "a".to_string()
            }
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn resolve_reports_first_unknown_name() {
        let set = AttributeSet::from_attributes([Attribute::nominal("a"), Attribute::float("b")])
            .expect("build set");
        assert_eq!(set.resolve(&["b", "a"]).expect("resolve"), vec![1, 0]);
        assert_eq!(
            set.resolve(&["a", "zz"]).unwrap_err(),
            TableError::unknown_attribute("zz")
        );
    }
}

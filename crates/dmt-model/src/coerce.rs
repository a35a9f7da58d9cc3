//! Text to value coercion ("auto type").
//!
//! Raw text is classified as integer, float, nominal or null. A column's
//! kind is the join of its cells' classes, after which every cell is coerced
//! to a [`Value`] of that kind.

use crate::attribute::{Attribute, AttributeDomain, AttributeKind};
use crate::error::{Result, TableError};
use crate::value::Value;

/// Default text standing for a missing value.
pub const DEFAULT_NULL_MARKER: &str = "?";

/// Classification of one piece of raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    Null,
    Integer,
    Float,
    Nominal,
}

impl TextClass {
    /// Least upper bound of two classes: `Null` is neutral, integers widen
    /// to floats and anything non-numeric makes the column nominal.
    pub fn join(self, other: TextClass) -> TextClass {
        match (self, other) {
            (TextClass::Null, other) | (other, TextClass::Null) => other,
            (TextClass::Nominal, _) | (_, TextClass::Nominal) => TextClass::Nominal,
            (TextClass::Float, _) | (_, TextClass::Float) => TextClass::Float,
            (TextClass::Integer, TextClass::Integer) => TextClass::Integer,
        }
    }

    /// Attribute kind for a column of this class; all-null columns are nominal.
    pub fn kind(self) -> AttributeKind {
        match self {
            TextClass::Integer => AttributeKind::Integer,
            TextClass::Float => AttributeKind::Float,
            TextClass::Null | TextClass::Nominal => AttributeKind::Nominal,
        }
    }
}

/// True if `text` stands for a missing value.
pub fn is_null_text(text: &str, null_marker: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == null_marker
}

/// Classify raw text.
pub fn classify_text(text: &str, null_marker: &str) -> TextClass {
    if is_null_text(text, null_marker) {
        return TextClass::Null;
    }
    let trimmed = text.trim();
    if is_integer_text(trimmed) && trimmed.parse::<i64>().is_ok() {
        TextClass::Integer
    } else if is_float_text(trimmed) && trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
        TextClass::Float
    } else {
        TextClass::Nominal
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal or exponent notation; rejects `inf`, `nan` and friends.
fn is_float_text(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    body.bytes().any(|b| b.is_ascii_digit())
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}

/// Parse integer text for the named attribute.
pub fn parse_integer(attribute: &str, text: &str) -> Result<i64> {
    let trimmed = text.trim();
    if !is_integer_text(trimmed) {
        return Err(TableError::malformed(attribute, text, "not an integer"));
    }
    trimmed
        .parse::<i64>()
        .map_err(|error| TableError::malformed(attribute, text, error.to_string()))
}

/// Parse decimal or exponent text for the named attribute.
pub fn parse_float(attribute: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if !is_float_text(trimmed) {
        return Err(TableError::malformed(attribute, text, "not a number"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(TableError::malformed(attribute, text, "number out of range")),
        Err(error) => Err(TableError::malformed(attribute, text, error.to_string())),
    }
}

/// Coerce raw text into a value of `attribute`, extending its domain.
///
/// Nominal text becomes a new label when it is not part of the domain yet;
/// metric values widen the declared bounds. Values equal to the attribute's
/// null sentinel become [`Value::Null`].
pub fn coerce(attribute: &mut Attribute, text: &str, null_marker: &str) -> Result<Value> {
    if is_null_text(text, null_marker) {
        return Ok(Value::Null);
    }
    let name = attribute.name().to_string();
    match attribute.kind() {
        AttributeKind::Nominal => {
            let index = attribute
                .nominal_domain_mut()
                .map(|values| values.insert(text.trim()))
                .unwrap_or_default();
            Ok(Value::Nominal(index))
        }
        AttributeKind::Integer => {
            let value = parse_integer(&name, text)?;
            let Some(bounds) = attribute.integer_domain_mut() else {
                return Ok(Value::Null);
            };
            if bounds.null_sentinel == Some(value) {
                return Ok(Value::Null);
            }
            bounds.widen(value);
            Ok(Value::Integer(value))
        }
        AttributeKind::Float => {
            let value = parse_float(&name, text)?;
            let Some(bounds) = attribute.float_domain_mut() else {
                return Ok(Value::Null);
            };
            if bounds.null_sentinel == Some(value) {
                return Ok(Value::Null);
            }
            bounds.widen(value);
            Ok(Value::Float(value))
        }
    }
}

/// A fresh attribute for a column whose cells joined to `class`.
pub fn attribute_for_class(name: impl Into<String>, class: TextClass) -> Attribute {
    Attribute::new(name, AttributeDomain::empty(class.kind()))
}

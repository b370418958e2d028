//! Typed local field values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A typed value held by a local entity field.
///
/// Remote records carry untyped JSON scalars; coercion turns them into one
/// of these variants (or nothing, when the scalar does not fit the target
/// type). Bounded single-character flags are stored as [`FieldValue::Str`]
/// after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A trimmed string.
    Str(String),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A UTC timestamp.
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Returns the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Renders the value as the string used for key matching.
    ///
    /// Unique keys arrive as strings or numbers depending on the remote
    /// serializer; both must match the same stored row.
    pub fn to_key_string(&self) -> Option<String> {
        match self {
            FieldValue::Str(s) => Some(s.clone()),
            FieldValue::Int(i) => Some(i.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_string_from_str_and_int() {
        assert_eq!(
            FieldValue::Str("2024001".into()).to_key_string(),
            Some("2024001".into())
        );
        assert_eq!(FieldValue::Int(2024001).to_key_string(), Some("2024001".into()));
        assert_eq!(FieldValue::Bool(true).to_key_string(), None);
    }

    #[test]
    fn accessors() {
        assert_eq!(FieldValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(FieldValue::Int(3).as_int(), Some(3));
        assert_eq!(FieldValue::Int(3).as_str(), None);
    }
}

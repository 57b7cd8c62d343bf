//! Raw and normalized value representations
//!
//! [`RawValue`] is what the persistence layer's field reader yields: loosely
//! typed, possibly holding entity references. [`NormalizedValue`] is the
//! canonical, comparison-stable form stored in audit records after type-aware
//! normalization.

use serde::Serialize;
use std::fmt;

use super::entity::EntityRef;
use super::summary::SummaryRecord;

/// A raw field value as read from an entity instance
///
/// Scalar fields and association references are carried uniformly; the
/// declared field metadata decides how a value is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// To-one association slot
    Entity(EntityRef),
    /// To-many association slot; never diffed, carried for completeness
    Collection(Vec<EntityRef>),
}

impl RawValue {
    /// Short name of the value's shape, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Entity(_) => "entity",
            Self::Collection(_) => "collection",
        }
    }

    /// True if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<EntityRef> for RawValue {
    fn from(entity: EntityRef) -> Self {
        Self::Entity(entity)
    }
}

/// The canonical audit representation of a single value
///
/// Serializes untagged: scalars become plain JSON scalars, association
/// values become the summary object of the referenced entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Entity(Box<SummaryRecord>),
}

impl NormalizedValue {
    /// True if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for NormalizedValue {
    /// Plain scalar rendering, used when synthesizing entity labels
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
            Self::Entity(summary) => write!(f, "{}", summary.label),
        }
    }
}

impl From<&str> for NormalizedValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for NormalizedValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for NormalizedValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_kind_names() {
        assert_eq!(RawValue::Null.kind_name(), "null");
        assert_eq!(RawValue::Int(1).kind_name(), "integer");
        assert_eq!(RawValue::Collection(vec![]).kind_name(), "collection");
    }

    #[test]
    fn test_normalized_scalar_serialization() {
        assert_eq!(
            serde_json::to_value(NormalizedValue::Null).unwrap(),
            json!(null)
        );
        assert_eq!(
            serde_json::to_value(NormalizedValue::Int(42)).unwrap(),
            json!(42)
        );
        assert_eq!(
            serde_json::to_value(NormalizedValue::Text("draft".into())).unwrap(),
            json!("draft")
        );
        assert_eq!(
            serde_json::to_value(NormalizedValue::Bool(true)).unwrap(),
            json!(true)
        );
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(NormalizedValue::Null.to_string(), "null");
        assert_eq!(NormalizedValue::Int(42).to_string(), "42");
        assert_eq!(NormalizedValue::Text("abc".into()).to_string(), "abc");
        assert_eq!(NormalizedValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_cross_variant_inequality() {
        // Normalization is what makes comparisons meaningful; distinct
        // variants never compare equal.
        assert_ne!(NormalizedValue::Int(42), NormalizedValue::Text("42".into()));
        assert_ne!(NormalizedValue::Null, NormalizedValue::Text("null".into()));
    }
}

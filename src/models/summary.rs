//! Compact descriptions of referenced entities
//!
//! A [`SummaryRecord`] stands in for a related entity inside an audit record
//! without embedding its full state: a label, the type name, the physical
//! storage location, and the resolved identity.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::value::NormalizedValue;

/// Compact descriptive record for one referenced entity
///
/// `identity` is the resolved primary key value; `id_field` is the name of
/// the identifier field it was read from, so serialized output self-describes
/// which field is the key.
#[derive(Debug, Clone)]
pub struct SummaryRecord {
    /// Human-readable label
    pub label: String,
    /// Fully qualified type name in dotted namespace form
    pub type_name: String,
    /// Physical storage location (table or collection name)
    pub table: String,
    /// Name of the identifier field
    pub id_field: String,
    /// Resolved identity value (always a scalar, never an entity)
    pub identity: NormalizedValue,
}

impl SummaryRecord {
    /// Create a summary record
    pub fn new(
        label: impl Into<String>,
        type_name: impl Into<String>,
        table: impl Into<String>,
        id_field: impl Into<String>,
        identity: NormalizedValue,
    ) -> Self {
        Self {
            label: label.into(),
            type_name: type_name.into(),
            table: table.into(),
            id_field: id_field.into(),
            identity,
        }
    }
}

/// Two summaries describe the same entity when type and identity match;
/// label and storage location do not participate in equality.
impl PartialEq for SummaryRecord {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.identity == other.identity
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl Serialize for SummaryRecord {
    /// Serializes as `{"label": .., "type": .., "table": .., "<id_field>": ..}`
    /// with the identity keyed under the identifier field's own name.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry("type", &self.type_name)?;
        map.serialize_entry("table", &self.table)?;
        map.serialize_entry(self.id_field.as_str(), &self.identity)?;
        map.end()
    }
}

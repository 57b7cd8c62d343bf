//! Entity type metadata
//!
//! Describes, per entity type, the declared identifier field, the physical
//! storage location, and the shape of every mapped field. Metadata is
//! supplied by the persistence layer, read-only, and assumed static for the
//! process lifetime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AuditError, AuditResult};

/// Declared storage type tag for a scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    BigInt,
    Integer,
    SmallInt,
    Decimal,
    Float,
    Boolean,
    String,
    Text,
    Date,
    Time,
    DateTime,
    Uuid,
    Json,
}

impl StorageType {
    /// True for the large-integer category, which normalizes to decimal text
    pub fn is_big_integer(&self) -> bool {
        matches!(self, Self::BigInt)
    }

    /// True for the standard/small integer category, which normalizes to a
    /// native integer
    pub fn is_native_integer(&self) -> bool {
        matches!(self, Self::Integer | Self::SmallInt)
    }

    /// True for categories whose canonical audit form is the storage layer's
    /// in-memory representation
    pub fn converts_to_native(&self) -> bool {
        matches!(self, Self::Decimal | Self::Float | Self::Boolean)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BigInt => "bigint",
            Self::Integer => "integer",
            Self::SmallInt => "smallint",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Text => "text",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Uuid => "uuid",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Cardinality of an association field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// To-one: the field holds at most one entity reference
    Single,
    /// To-many: the field holds a collection of entity references
    Collection,
}

/// How a single mapped field is declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain column with a declared storage type
    Scalar { storage_type: StorageType },
    /// Embedded value object; never diffed
    Embedded,
    /// Reference to another entity type
    Association {
        cardinality: Cardinality,
        target: String,
    },
}

impl FieldKind {
    /// True for association fields of either cardinality
    pub fn is_association(&self) -> bool {
        matches!(self, Self::Association { .. })
    }

    /// True for to-one association fields
    pub fn is_single_association(&self) -> bool {
        matches!(
            self,
            Self::Association {
                cardinality: Cardinality::Single,
                ..
            }
        )
    }
}

/// Metadata for one entity type
///
/// `fields` is keyed by field name; the identifier field must appear in it.
/// `has_label` is the label capability flag: when set, the field reader can
/// produce a human-readable label for instances of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Fully qualified type name in dotted namespace form
    pub type_name: String,
    /// Physical storage location (table or collection name)
    pub table: String,
    /// Name of the declared single identifier field
    pub id_field: String,
    /// Whether instances expose a human-readable label
    pub has_label: bool,
    /// Declared shape of every mapped field
    pub fields: BTreeMap<String, FieldKind>,
}

impl EntityMetadata {
    /// Create metadata with no fields; populate via [`EntityMetadata::with_field`]
    pub fn new(
        type_name: impl Into<String>,
        table: impl Into<String>,
        id_field: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            table: table.into(),
            id_field: id_field.into(),
            has_label: false,
            fields: BTreeMap::new(),
        }
    }

    /// Add a field declaration (builder style)
    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// Mark this type as exposing a human-readable label
    pub fn with_label(mut self) -> Self {
        self.has_label = true;
        self
    }

    /// Look up a field declaration, or fail with [`AuditError::UnknownField`]
    pub fn field(&self, name: &str) -> AuditResult<&FieldKind> {
        self.fields
            .get(name)
            .ok_or_else(|| AuditError::unknown_field(&self.type_name, name))
    }

    /// Declaration of the identifier field itself
    pub fn id_kind(&self) -> AuditResult<&FieldKind> {
        self.field(&self.id_field)
    }

    /// Whether the declared identifier is itself an association
    pub fn is_id_association(&self) -> bool {
        matches!(self.id_kind(), Ok(kind) if kind.is_association())
    }
}

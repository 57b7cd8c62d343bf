//! Custom error types for entity-audit
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions. Every fallible operation in the crate
//! returns [`AuditResult`].

use thiserror::Error;

use crate::models::metadata::StorageType;

/// The main error type for audit-core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// The metadata provider does not know the requested entity type
    #[error("Metadata unavailable for entity type '{type_name}'")]
    MetadataUnavailable { type_name: String },

    /// The entity type is known but has no field with this name
    #[error("Unknown field '{field}' on entity type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    /// The declared identifier resolves through more than one association hop
    ///
    /// This is a mapping defect: identity may be derived through at most one
    /// foreign association, and the target of that association must carry a
    /// scalar identifier of its own.
    #[error("Identifier field '{field}' of '{type_name}' cannot be resolved to a scalar value")]
    MultiHopIdentity { type_name: String, field: String },

    /// The storage codec rejected a raw value for its declared type
    #[error("Cannot convert value of field '{field}' declared as '{storage_type}': {reason}")]
    ValueConversion {
        field: String,
        storage_type: StorageType,
        reason: String,
    },

    /// A lazily-loaded entity reference could not be resolved
    #[error("Failed to materialize entity of type '{type_name}': {reason}")]
    Materialization { type_name: String, reason: String },
}

impl AuditError {
    /// Create a "metadata unavailable" error
    pub fn metadata_unavailable(type_name: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            type_name: type_name.into(),
        }
    }

    /// Create an "unknown field" error
    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a conversion error; the field name is attached later by the
    /// caller that knows it (see [`AuditError::for_field`])
    pub fn conversion(storage_type: StorageType, reason: impl Into<String>) -> Self {
        Self::ValueConversion {
            field: String::new(),
            storage_type,
            reason: reason.into(),
        }
    }

    /// Create a materialization error
    pub fn materialization(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Materialization {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Attach a field name to a conversion error
    ///
    /// Codecs produce [`AuditError::ValueConversion`] without knowing which
    /// field the value came from; the resolver and diff layers fill it in.
    /// Other variants pass through unchanged.
    pub fn for_field(self, field: &str) -> Self {
        match self {
            Self::ValueConversion {
                storage_type,
                reason,
                ..
            } => Self::ValueConversion {
                field: field.to_string(),
                storage_type,
                reason,
            },
            other => other,
        }
    }

    /// Check if this is a materialization failure
    pub fn is_materialization(&self) -> bool {
        matches!(self, Self::Materialization { .. })
    }

    /// Check if this is a value conversion failure
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::ValueConversion { .. })
    }
}

/// Result type alias for audit-core operations
pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditError::metadata_unavailable("app.billing.Order");
        assert_eq!(
            err.to_string(),
            "Metadata unavailable for entity type 'app.billing.Order'"
        );
    }

    #[test]
    fn test_conversion_error_field_attachment() {
        let err = AuditError::conversion(StorageType::Boolean, "expected bool, got text");
        let err = err.for_field("active");
        assert_eq!(
            err.to_string(),
            "Cannot convert value of field 'active' declared as 'boolean': expected bool, got text"
        );
        assert!(err.is_conversion());
    }

    #[test]
    fn test_for_field_leaves_other_variants_alone() {
        let err = AuditError::unknown_field("app.billing.Order", "ghost");
        assert_eq!(err.clone().for_field("other"), err);
    }

    #[test]
    fn test_materialization_predicate() {
        let err = AuditError::materialization("app.billing.Order", "row deleted");
        assert!(err.is_materialization());
        assert!(!err.is_conversion());
    }
}

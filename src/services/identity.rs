//! Primary-key resolution
//!
//! Resolves the identity of an entity instance from its declared identifier
//! field. Identity may sit directly in a scalar field, or be derived through
//! a single to-one association whose target carries the actual key. The
//! indirection is limited to exactly one hop.

use crate::backend::EntityBackend;
use crate::error::{AuditError, AuditResult};
use crate::models::entity::EntityRef;
use crate::models::metadata::{Cardinality, FieldKind};
use crate::models::value::{NormalizedValue, RawValue};

use super::normalizer::ValueNormalizer;

/// Service resolving the normalized primary-key value of an entity
pub struct IdentityResolver<'a, B: EntityBackend> {
    backend: &'a B,
}

impl<'a, B: EntityBackend> IdentityResolver<'a, B> {
    /// Create a new identity resolver
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Resolve the identity of one instance
    ///
    /// Pure with respect to the instance: repeated calls on unmutated state
    /// yield the same value. A scalar identifier is read and normalized with
    /// its declared storage type. An association identifier is followed for
    /// exactly one hop into the referenced entity's own scalar identifier;
    /// anything deeper is a mapping defect and surfaces as
    /// [`AuditError::MultiHopIdentity`].
    pub fn resolve_id(&self, entity: &EntityRef) -> AuditResult<NormalizedValue> {
        let meta = self.backend.metadata(&entity.type_name)?;

        match meta.id_kind()? {
            FieldKind::Scalar { storage_type } => {
                let raw = self.backend.read_field(entity, &meta.id_field)?;
                ValueNormalizer::new(self.backend)
                    .normalize(*storage_type, &raw)
                    .map_err(|e| e.for_field(&meta.id_field))
            }
            FieldKind::Association {
                cardinality: Cardinality::Single,
                ..
            } => {
                let raw = self.backend.read_field(entity, &meta.id_field)?;
                let target = match raw {
                    RawValue::Entity(target) => target,
                    RawValue::Null => {
                        return Err(AuditError::materialization(
                            &entity.type_name,
                            format!("identifier association '{}' is unset", meta.id_field),
                        ))
                    }
                    other => {
                        return Err(AuditError::materialization(
                            &entity.type_name,
                            format!(
                                "identifier association '{}' holds {}, expected an entity reference",
                                meta.id_field,
                                other.kind_name()
                            ),
                        ))
                    }
                };

                let target_meta = self.backend.metadata(&target.type_name)?;
                match target_meta.id_kind()? {
                    FieldKind::Scalar { storage_type } => {
                        let raw = self.backend.read_field(&target, &target_meta.id_field)?;
                        ValueNormalizer::new(self.backend)
                            .normalize(*storage_type, &raw)
                            .map_err(|e| e.for_field(&target_meta.id_field))
                    }
                    // The hop stops here: the target's identifier must be a
                    // plain scalar.
                    _ => Err(AuditError::MultiHopIdentity {
                        type_name: entity.type_name.clone(),
                        field: meta.id_field.clone(),
                    }),
                }
            }
            _ => Err(AuditError::MultiHopIdentity {
                type_name: entity.type_name.clone(),
                field: meta.id_field.clone(),
            }),
        }
    }
}

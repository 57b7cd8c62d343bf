//! Entity summarization
//!
//! Produces the compact [`SummaryRecord`] used both as the "describe this
//! entity" operation and as the per-side value of to-one association fields
//! in a diff.

use crate::backend::EntityBackend;
use crate::error::AuditResult;
use crate::models::entity::EntityRef;
use crate::models::summary::SummaryRecord;
use crate::models::value::NormalizedValue;

use super::identity::IdentityResolver;

/// Service describing entity references without embedding their state
pub struct EntitySummarizer<'a, B: EntityBackend> {
    backend: &'a B,
}

impl<'a, B: EntityBackend> EntitySummarizer<'a, B> {
    /// Create a new entity summarizer
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Summarize an entity reference
    ///
    /// `None` in means `None` out: summarizing "no entity" is a normal
    /// input, not an error. A target that cannot be materialized, or whose
    /// identity resolves to null, also yields `None` — callers treat "could
    /// not describe this association target" the same as "no association".
    /// Configuration defects (missing metadata, multi-hop identifiers) still
    /// propagate as hard errors.
    ///
    /// `known_id` skips identity resolution when the caller already holds
    /// the key.
    pub fn summarize(
        &self,
        entity: Option<&EntityRef>,
        known_id: Option<NormalizedValue>,
    ) -> AuditResult<Option<SummaryRecord>> {
        let Some(entity) = entity else {
            return Ok(None);
        };

        // Force lazy proxies to resolve before reading any field; a
        // partially loaded instance would yield corrupt labels.
        match self.backend.materialize(entity) {
            Ok(()) => {}
            Err(e) if e.is_materialization() => return Ok(None),
            Err(e) => return Err(e),
        }

        let identity = match known_id {
            Some(id) => id,
            None => match IdentityResolver::new(self.backend).resolve_id(entity) {
                Ok(id) => id,
                Err(e) if e.is_materialization() => return Ok(None),
                Err(e) => return Err(e),
            },
        };
        if identity.is_null() {
            return Ok(None);
        }

        let meta = self.backend.metadata(&entity.type_name)?;
        let label = if meta.has_label {
            self.backend.read_label(entity)?
        } else {
            format!("{}#{}", meta.type_name, identity)
        };

        Ok(Some(SummaryRecord::new(
            label,
            &meta.type_name,
            &meta.table,
            &meta.id_field,
            identity,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::AuditError;
    use crate::models::entity::InstanceId;
    use crate::models::metadata::{EntityMetadata, FieldKind, StorageType};
    use crate::models::value::RawValue;

    fn backend() -> MemoryBackend {
        let mut backend = MemoryBackend::new();
        backend.register(
            EntityMetadata::new("app.billing.Order", "orders", "id").with_field(
                "id",
                FieldKind::Scalar {
                    storage_type: StorageType::Integer,
                },
            ),
        );
        backend.register(
            EntityMetadata::new("app.access.User", "users", "id")
                .with_field(
                    "id",
                    FieldKind::Scalar {
                        storage_type: StorageType::Integer,
                    },
                )
                .with_label(),
        );
        backend
    }

    #[test]
    fn test_no_entity_is_no_summary() {
        let backend = backend();
        let summary = EntitySummarizer::new(&backend)
            .summarize(None, Some(NormalizedValue::Int(42)))
            .unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_synthesized_label() {
        let mut backend = backend();
        let order = backend
            .insert("app.billing.Order", &[("id", RawValue::Int(42))])
            .unwrap();

        let summary = EntitySummarizer::new(&backend)
            .summarize(Some(&order), None)
            .unwrap()
            .unwrap();
        assert_eq!(summary.label, "app.billing.Order#42");
        assert_eq!(summary.table, "orders");
        assert_eq!(summary.id_field, "id");
        assert_eq!(summary.identity, NormalizedValue::Int(42));
    }

    #[test]
    fn test_label_capability_is_used() {
        let mut backend = backend();
        let user = backend
            .insert_labeled("app.access.User", "Marisol Lopez", &[("id", RawValue::Int(7))])
            .unwrap();

        let summary = EntitySummarizer::new(&backend)
            .summarize(Some(&user), None)
            .unwrap()
            .unwrap();
        assert_eq!(summary.label, "Marisol Lopez");
        assert_eq!(summary.type_name, "app.access.User");
    }

    #[test]
    fn test_known_id_skips_resolution() {
        let mut backend = backend();
        let order = backend
            .insert("app.billing.Order", &[("id", RawValue::Int(42))])
            .unwrap();

        let summary = EntitySummarizer::new(&backend)
            .summarize(Some(&order), Some(NormalizedValue::Int(99)))
            .unwrap()
            .unwrap();
        assert_eq!(summary.identity, NormalizedValue::Int(99));
    }

    #[test]
    fn test_unmaterializable_target_soft_fails() {
        let mut backend = backend();
        let order = backend
            .insert("app.billing.Order", &[("id", RawValue::Int(42))])
            .unwrap();
        backend.mark_unloadable(&order);

        let summary = EntitySummarizer::new(&backend)
            .summarize(Some(&order), None)
            .unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_null_identity_soft_fails() {
        let mut backend = backend();
        // Stored without an id value: resolution yields null.
        let order = backend.insert("app.billing.Order", &[]).unwrap();

        let summary = EntitySummarizer::new(&backend)
            .summarize(Some(&order), None)
            .unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_missing_metadata_stays_hard() {
        let backend = backend();
        let ghost = EntityRef::new("app.billing.Ghost", InstanceId::new());
        // The unknown instance soft-fails at materialization before metadata
        // is ever consulted, so use a registered-type instance with a
        // missing target type instead.
        let mut backend2 = MemoryBackend::new();
        backend2.register(
            EntityMetadata::new("app.billing.LineItem", "line_items", "order").with_field(
                "order",
                FieldKind::Association {
                    cardinality: crate::models::Cardinality::Single,
                    target: "app.billing.Order".to_string(),
                },
            ),
        );
        let dangling = EntityRef::new("app.billing.Order", InstanceId::new());
        let item = backend2
            .insert(
                "app.billing.LineItem",
                &[("order", RawValue::Entity(dangling))],
            )
            .unwrap();

        let err = EntitySummarizer::new(&backend2)
            .summarize(Some(&item), None)
            .unwrap_err();
        assert!(matches!(err, AuditError::MetadataUnavailable { .. }));

        // An entirely unknown instance of a known shape soft-fails instead.
        assert!(EntitySummarizer::new(&backend)
            .summarize(Some(&ghost), None)
            .unwrap()
            .is_none());
    }
}

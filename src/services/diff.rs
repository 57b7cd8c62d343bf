//! Change-set computation
//!
//! Compares raw old/new field values per change tuple, applies the audit
//! inclusion policy, normalizes both sides, and keeps only the fields that
//! actually changed. The result is keyed in ascending field order so audit
//! records are reproducible.

use crate::backend::{AuditPolicy, EntityBackend};
use crate::error::{AuditError, AuditResult};
use crate::models::entity::EntityRef;
use crate::models::metadata::{Cardinality, FieldKind};
use crate::models::record::{ChangeTuple, DiffRecord, FieldChange};
use crate::models::value::{NormalizedValue, RawValue};

use super::normalizer::ValueNormalizer;
use super::summarizer::EntitySummarizer;

/// Service computing per-field change sets
pub struct DiffEngine<'a, B: EntityBackend, P: AuditPolicy> {
    backend: &'a B,
    policy: &'a P,
}

impl<'a, B: EntityBackend, P: AuditPolicy> DiffEngine<'a, B, P> {
    /// Create a new diff engine
    pub fn new(backend: &'a B, policy: &'a P) -> Self {
        Self { backend, policy }
    }

    /// Compute the change set for one entity
    ///
    /// Each tuple is handled independently: scalar fields normalize both
    /// sides through the value codec, to-one associations summarize both
    /// sides as independent entity references, and everything else
    /// (embedded values, collections, policy-excluded fields) is skipped
    /// entirely. Fields whose normalized sides are equal are omitted. A
    /// normalization failure on any field fails the whole call; partially
    /// computed audit records are never produced.
    pub fn diff(&self, entity: &EntityRef, changes: &[ChangeTuple]) -> AuditResult<DiffRecord> {
        let meta = self.backend.metadata(&entity.type_name)?;
        let mut record = DiffRecord::new();

        for change in changes {
            let kind = meta.field(&change.field)?;
            if !self.policy.is_field_audited(entity, &change.field) {
                continue;
            }

            let pair = match kind {
                FieldKind::Scalar { storage_type } => {
                    let normalizer = ValueNormalizer::new(self.backend);
                    let old = normalizer
                        .normalize(*storage_type, &change.old)
                        .map_err(|e| e.for_field(&change.field))?;
                    let new = normalizer
                        .normalize(*storage_type, &change.new)
                        .map_err(|e| e.for_field(&change.field))?;
                    Some((old, new))
                }
                FieldKind::Association {
                    cardinality: Cardinality::Single,
                    target,
                } => {
                    let old = self.summarize_side(target, &change.field, &change.old)?;
                    let new = self.summarize_side(target, &change.field, &change.new)?;
                    Some((old, new))
                }
                FieldKind::Embedded
                | FieldKind::Association {
                    cardinality: Cardinality::Collection,
                    ..
                } => None,
            };

            if let Some((old, new)) = pair {
                if old != new {
                    record.insert(change.field.clone(), FieldChange { old, new });
                }
            }
        }

        Ok(record)
    }

    fn summarize_side(
        &self,
        target: &str,
        field: &str,
        raw: &RawValue,
    ) -> AuditResult<NormalizedValue> {
        let entity = match raw {
            RawValue::Null => None,
            RawValue::Entity(entity) => Some(entity),
            // A corrupt association slot is fatal for the whole diff, not
            // something to coerce to null.
            other => {
                return Err(AuditError::materialization(
                    target,
                    format!(
                        "association '{}' holds {}, expected an entity reference",
                        field,
                        other.kind_name()
                    ),
                ))
            }
        };
        let summary = EntitySummarizer::new(self.backend).summarize(entity, None)?;
        Ok(summary
            .map(|s| NormalizedValue::Entity(Box::new(s)))
            .unwrap_or(NormalizedValue::Null))
    }
}

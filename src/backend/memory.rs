//! In-memory backend
//!
//! A self-contained implementation of the collaborator traits over plain
//! maps: registered type metadata plus an instance table. It backs the test
//! suite and doubles as a reference for what a real persistence adapter has
//! to provide, including a value codec with the same conversion split as a
//! production storage layer.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::error::{AuditError, AuditResult};
use crate::models::entity::{EntityRef, InstanceId};
use crate::models::metadata::{EntityMetadata, StorageType};
use crate::models::value::{NormalizedValue, RawValue};

use super::{FieldReader, Materializer, MetadataProvider, ValueCodec};

/// One stored instance
#[derive(Debug, Clone)]
struct Instance {
    type_name: String,
    fields: BTreeMap<String, RawValue>,
    label: Option<String>,
    /// Simulates a lazy reference whose backing row is gone
    unloadable: bool,
}

/// In-memory implementation of the persistence-side collaborators
#[derive(Debug, Default)]
pub struct MemoryBackend {
    types: BTreeMap<String, EntityMetadata>,
    instances: HashMap<InstanceId, Instance>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity type
    pub fn register(&mut self, metadata: EntityMetadata) {
        self.types.insert(metadata.type_name.clone(), metadata);
    }

    /// Store an instance of a registered type and hand back its reference
    ///
    /// Fields left out of `fields` read as [`RawValue::Null`].
    pub fn insert(&mut self, type_name: &str, fields: &[(&str, RawValue)]) -> AuditResult<EntityRef> {
        self.insert_instance(type_name, fields, None)
    }

    /// Store an instance carrying a human-readable label
    pub fn insert_labeled(
        &mut self,
        type_name: &str,
        label: &str,
        fields: &[(&str, RawValue)],
    ) -> AuditResult<EntityRef> {
        self.insert_instance(type_name, fields, Some(label.to_string()))
    }

    /// Make an instance behave like a reference whose row was deleted
    pub fn mark_unloadable(&mut self, entity: &EntityRef) {
        if let Some(instance) = self.instances.get_mut(&entity.instance) {
            instance.unloadable = true;
        }
    }

    fn insert_instance(
        &mut self,
        type_name: &str,
        fields: &[(&str, RawValue)],
        label: Option<String>,
    ) -> AuditResult<EntityRef> {
        if !self.types.contains_key(type_name) {
            return Err(AuditError::metadata_unavailable(type_name));
        }

        let id = InstanceId::new();
        self.instances.insert(
            id,
            Instance {
                type_name: type_name.to_string(),
                fields: fields
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
                label,
                unloadable: false,
            },
        );

        Ok(EntityRef::new(type_name, id))
    }

    fn instance(&self, entity: &EntityRef) -> AuditResult<&Instance> {
        let instance = self
            .instances
            .get(&entity.instance)
            .ok_or_else(|| AuditError::materialization(&entity.type_name, "unknown instance"))?;
        if instance.unloadable {
            return Err(AuditError::materialization(
                &entity.type_name,
                "backing row no longer exists",
            ));
        }
        Ok(instance)
    }
}

impl MetadataProvider for MemoryBackend {
    fn metadata(&self, type_name: &str) -> AuditResult<&EntityMetadata> {
        self.types
            .get(type_name)
            .ok_or_else(|| AuditError::metadata_unavailable(type_name))
    }
}

impl FieldReader for MemoryBackend {
    fn read_field(&self, entity: &EntityRef, field: &str) -> AuditResult<RawValue> {
        let instance = self.instance(entity)?;
        Ok(instance
            .fields
            .get(field)
            .cloned()
            .unwrap_or(RawValue::Null))
    }

    fn read_label(&self, entity: &EntityRef) -> AuditResult<String> {
        let instance = self.instance(entity)?;
        instance
            .label
            .clone()
            .ok_or_else(|| AuditError::unknown_field(&instance.type_name, "label"))
    }
}

impl Materializer for MemoryBackend {
    fn materialize(&self, entity: &EntityRef) -> AuditResult<()> {
        self.instance(entity).map(|_| ())
    }
}

impl ValueCodec for MemoryBackend {
    fn to_native(
        &self,
        storage_type: StorageType,
        raw: &RawValue,
    ) -> AuditResult<NormalizedValue> {
        if raw.is_null() {
            return Ok(NormalizedValue::Null);
        }
        match storage_type {
            StorageType::Decimal => decimal_text(storage_type, raw),
            StorageType::Float => match raw {
                RawValue::Float(x) => Ok(NormalizedValue::Float(*x)),
                RawValue::Int(i) => Ok(NormalizedValue::Float(*i as f64)),
                RawValue::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(NormalizedValue::Float)
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Boolean => match raw {
                RawValue::Bool(b) => Ok(NormalizedValue::Bool(*b)),
                RawValue::Int(0) => Ok(NormalizedValue::Bool(false)),
                RawValue::Int(1) => Ok(NormalizedValue::Bool(true)),
                other => Err(reject(storage_type, other)),
            },
            StorageType::BigInt | StorageType::Integer | StorageType::SmallInt => match raw {
                RawValue::Int(i) => Ok(NormalizedValue::Int(*i)),
                RawValue::Text(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(NormalizedValue::Int)
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
                other => Err(reject(storage_type, other)),
            },
            _ => self.to_storage(storage_type, raw),
        }
    }

    fn to_storage(
        &self,
        storage_type: StorageType,
        raw: &RawValue,
    ) -> AuditResult<NormalizedValue> {
        if raw.is_null() {
            return Ok(NormalizedValue::Null);
        }
        match storage_type {
            StorageType::String | StorageType::Text => match raw {
                RawValue::Text(s) => Ok(NormalizedValue::Text(s.clone())),
                RawValue::Int(i) => Ok(NormalizedValue::Text(i.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Date => match raw {
                RawValue::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(|d| NormalizedValue::Text(d.format("%Y-%m-%d").to_string()))
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Time => match raw {
                RawValue::Text(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
                    .map(|t| NormalizedValue::Text(t.format("%H:%M:%S").to_string()))
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::DateTime => match raw {
                RawValue::Text(s) => DateTime::parse_from_rfc3339(s)
                    .map(|dt| NormalizedValue::Text(dt.to_rfc3339()))
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Uuid => match raw {
                RawValue::Text(s) => Uuid::parse_str(s.trim())
                    .map(|u| NormalizedValue::Text(u.hyphenated().to_string()))
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Json => match raw {
                RawValue::Text(s) => serde_json::from_str::<serde_json::Value>(s)
                    .map_err(|e| AuditError::conversion(storage_type, e.to_string()))
                    .and_then(|value| {
                        serde_json::to_string(&value)
                            .map(NormalizedValue::Text)
                            .map_err(|e| AuditError::conversion(storage_type, e.to_string()))
                    }),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Decimal => decimal_text(storage_type, raw),
            StorageType::BigInt | StorageType::Integer | StorageType::SmallInt => match raw {
                RawValue::Int(i) => Ok(NormalizedValue::Text(i.to_string())),
                RawValue::Text(s) => Ok(NormalizedValue::Text(s.trim().to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Float => match raw {
                RawValue::Float(x) => Ok(NormalizedValue::Text(x.to_string())),
                RawValue::Int(i) => Ok(NormalizedValue::Text(i.to_string())),
                other => Err(reject(storage_type, other)),
            },
            StorageType::Boolean => match raw {
                RawValue::Bool(b) => Ok(NormalizedValue::Text(if *b { "1" } else { "0" }.into())),
                other => Err(reject(storage_type, other)),
            },
        }
    }
}

/// Decimals stay textual so normalized comparison is precision-stable
fn decimal_text(storage_type: StorageType, raw: &RawValue) -> AuditResult<NormalizedValue> {
    match raw {
        RawValue::Text(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<f64>()
                .map_err(|e| AuditError::conversion(storage_type, e.to_string()))?;
            Ok(NormalizedValue::Text(trimmed.to_string()))
        }
        RawValue::Int(i) => Ok(NormalizedValue::Text(i.to_string())),
        RawValue::Float(x) => Ok(NormalizedValue::Text(x.to_string())),
        other => Err(reject(storage_type, other)),
    }
}

fn reject(storage_type: StorageType, raw: &RawValue) -> AuditError {
    AuditError::conversion(
        storage_type,
        format!("unexpected {} value", raw.kind_name()),
    )
}

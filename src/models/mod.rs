//! Core data models for entity-audit
//!
//! This module contains the data structures that represent the audit
//! domain: entity handles, type metadata, raw and normalized values,
//! entity summaries, actor context, and assembled audit records.

pub mod actor;
pub mod entity;
pub mod metadata;
pub mod naming;
pub mod record;
pub mod summary;
pub mod value;

pub use actor::ActorContext;
pub use entity::{EntityRef, InstanceId};
pub use metadata::{Cardinality, EntityMetadata, FieldKind, StorageType};
pub use naming::{param_to_type_name, type_name_to_param};
pub use record::{AuditRecord, ChangeTuple, DiffRecord, FieldChange, Operation};
pub use summary::SummaryRecord;
pub use value::{NormalizedValue, RawValue};

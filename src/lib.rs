//! entity-audit - Change tracking core for entity audit trails
//!
//! This library computes canonical, storable descriptions of entity
//! changes: which fields changed and how, what the entity's identity is,
//! and who made the change. Persistence of the resulting records, entity
//! lifecycle hooks and configuration loading are the hosting application's
//! business; the crate talks to its surroundings exclusively through the
//! collaborator traits in [`backend`].
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `models`: Core data models (entity handles, metadata, values,
//!   summaries, actor context, audit records)
//! - `backend`: Collaborator traits plus the in-memory reference backend
//! - `services`: The audit algorithms (normalization, identity resolution,
//!   summarization, diff computation, actor collection)
//!
//! # Example
//!
//! ```rust,ignore
//! use entity_audit::backend::AuditAll;
//! use entity_audit::services::DiffEngine;
//!
//! let engine = DiffEngine::new(&backend, &AuditAll);
//! let changes = engine.diff(&order, &change_tuples)?;
//! ```

pub mod backend;
pub mod error;
pub mod models;
pub mod services;

pub use error::{AuditError, AuditResult};
pub use models::{
    ActorContext, AuditRecord, ChangeTuple, DiffRecord, EntityRef, FieldChange, NormalizedValue,
    Operation, RawValue, SummaryRecord,
};
pub use services::{
    ActorContextCollector, DiffEngine, EntitySummarizer, IdentityResolver, ValueNormalizer,
};

//! Audit record data structures
//!
//! Defines change tuples as they arrive from the persistence layer, the
//! per-field change set produced by the diff engine, and the assembled
//! audit record handed back to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::actor::ActorContext;
use super::summary::SummaryRecord;
use super::value::{NormalizedValue, RawValue};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// One raw field-level change as gathered by the calling context
///
/// Field names are unique within one diff call; input order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTuple {
    pub field: String,
    pub old: RawValue,
    pub new: RawValue,
}

impl ChangeTuple {
    /// Create a change tuple
    pub fn new(field: impl Into<String>, old: RawValue, new: RawValue) -> Self {
        Self {
            field: field.into(),
            old,
            new,
        }
    }
}

/// Normalized before/after pair for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub old: NormalizedValue,
    pub new: NormalizedValue,
}

/// The set of fields that actually changed, keyed by field name
///
/// Iteration and serialization order is ascending by field name. Consumers
/// rely on this for reproducible records and golden-file comparison, so the
/// ordering is part of the contract, not a presentation choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DiffRecord(BTreeMap<String, FieldChange>);

impl DiffRecord {
    /// Create an empty diff record
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no field changed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of changed fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up the change for one field
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.0.get(field)
    }

    /// Record a changed field
    pub fn insert(&mut self, field: impl Into<String>, change: FieldChange) {
        self.0.insert(field.into(), change);
    }

    /// Changed field names in ascending order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over changes in ascending field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldChange)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A complete audit record for one operation on one entity
///
/// Assembled by the caller from the diff engine's change set, the entity's
/// summary, and the collected actor context. Persistence of the record is
/// outside this crate.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Identity and label of the affected entity
    pub entity: SummaryRecord,

    /// Fields that changed, with normalized before/after values
    pub changes: DiffRecord,

    /// Who made the change and where it came from
    pub actor: ActorContext,
}

impl AuditRecord {
    /// Assemble an audit record stamped with the current time
    pub fn new(
        operation: Operation,
        entity: SummaryRecord,
        changes: DiffRecord,
        actor: ActorContext,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity,
            changes,
            actor,
        }
    }

    /// Format the record for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity.label
        );

        if let Some(username) = &self.actor.username {
            output.push_str(&format!(" by {}", username));
        }

        for (field, change) in self.changes.iter() {
            output.push_str(&format!("\n  {}: {} -> {}", field, change.old, change.new));
        }

        output
    }
}

//! Opaque handles to persisted entity instances
//!
//! An [`EntityRef`] identifies one in-memory instance of a persisted object
//! together with its declared type name. The handle says nothing about the
//! entity's primary key; identity is resolved separately through metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque per-instance handle assigned by the backend
///
/// The handle identifies an instance slot, not a primary key: two loads of
/// the same row may carry different instance ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Create a new random instance id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an instance id from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an instance id from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ent-{}", &self.0.to_string()[..8])
    }
}

impl From<Uuid> for InstanceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for InstanceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("ent-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A reference to a persisted entity instance plus its declared type
///
/// Passed by reference through the audit core, never mutated. Cloning copies
/// the handle, not the instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Fully qualified type name in dotted namespace form
    pub type_name: String,
    /// Backend-assigned instance handle
    pub instance: InstanceId,
}

impl EntityRef {
    /// Create a reference to an instance of the given type
    pub fn new(type_name: impl Into<String>, instance: InstanceId) -> Self {
        Self {
            type_name: type_name.into(),
            instance,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.type_name, self.instance)
    }
}

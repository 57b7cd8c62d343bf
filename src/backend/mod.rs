//! Collaborator contracts of the audit core
//!
//! The core never talks to a concrete persistence or request layer. It
//! reads metadata, field values, and request context through the traits in
//! this module, and the hosting application plugs in its own
//! implementations. [`memory::MemoryBackend`] is the in-process reference
//! implementation used by the test suite.

pub mod memory;

pub use memory::MemoryBackend;

use std::net::IpAddr;

use crate::error::AuditResult;
use crate::models::entity::EntityRef;
use crate::models::metadata::{EntityMetadata, StorageType};
use crate::models::value::{NormalizedValue, RawValue};

/// Answers "what fields, associations and types does this entity type have"
pub trait MetadataProvider {
    /// Metadata for a type, or [`AuditError::MetadataUnavailable`]
    ///
    /// [`AuditError::MetadataUnavailable`]: crate::error::AuditError::MetadataUnavailable
    fn metadata(&self, type_name: &str) -> AuditResult<&EntityMetadata>;
}

/// Reads current field values off an entity instance
///
/// How values are read (reflection, accessors, column access) is the
/// implementor's business; the core only depends on this capability.
pub trait FieldReader {
    /// Raw current value of one field; scalar fields and association
    /// references are returned uniformly
    fn read_field(&self, entity: &EntityRef, field: &str) -> AuditResult<RawValue>;

    /// Human-readable label for an instance
    ///
    /// Called only for types whose metadata carries the label capability
    /// flag.
    fn read_label(&self, entity: &EntityRef) -> AuditResult<String>;
}

/// The storage layer's value codec
pub trait ValueCodec {
    /// Convert a raw value to the storage layer's canonical in-memory form
    fn to_native(&self, storage_type: StorageType, raw: &RawValue)
        -> AuditResult<NormalizedValue>;

    /// Convert a raw value to its storage/wire-level encoding
    fn to_storage(
        &self,
        storage_type: StorageType,
        raw: &RawValue,
    ) -> AuditResult<NormalizedValue>;
}

/// Forces lazily-loaded entity references to resolve
pub trait Materializer {
    /// Ensure the instance is fully loaded before any field is read; fails
    /// if the underlying row or record no longer exists
    fn materialize(&self, entity: &EntityRef) -> AuditResult<()>;
}

/// Everything the data-bearing services need from the persistence layer
pub trait EntityBackend: MetadataProvider + FieldReader + ValueCodec + Materializer {}

impl<T> EntityBackend for T where T: MetadataProvider + FieldReader + ValueCodec + Materializer {}

/// Externally configured per-field audit inclusion policy
pub trait AuditPolicy {
    /// Whether changes to this field of this entity are audited at all
    fn is_field_audited(&self, entity: &EntityRef, field: &str) -> bool;
}

impl<F> AuditPolicy for F
where
    F: Fn(&EntityRef, &str) -> bool,
{
    fn is_field_audited(&self, entity: &EntityRef, field: &str) -> bool {
        self(entity, field)
    }
}

/// Policy that audits every field
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditAll;

impl AuditPolicy for AuditAll {
    fn is_field_audited(&self, _entity: &EntityRef, _field: &str) -> bool {
        true
    }
}

/// The authenticated actor as exposed by the session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub username: String,
    /// Fully qualified type name of the actor entity
    pub type_name: String,
}

/// What the request layer knows about the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Client network address, when the transport exposes one
    pub client_ip: Option<IpAddr>,
}

/// Ambient request/session context, passed explicitly at call time
///
/// Every lookup may come back empty: no current request, no authenticated
/// actor, and no matching access-zone configuration are all normal states.
pub trait RequestScope {
    /// The request currently being served, if any
    fn current_request(&self) -> Option<RequestInfo>;

    /// Access-zone label (e.g. firewall zone) for a request
    fn access_zone(&self, request: &RequestInfo) -> Option<String>;

    /// The authenticated actor, if any
    fn current_actor(&self) -> Option<Actor>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::InstanceId;

    #[test]
    fn test_closure_policy() {
        let entity = EntityRef::new("app.billing.Order", InstanceId::new());
        let policy = |_: &EntityRef, field: &str| field != "secret";
        assert!(policy.is_field_audited(&entity, "status"));
        assert!(!policy.is_field_audited(&entity, "secret"));
    }

    #[test]
    fn test_audit_all_policy() {
        let entity = EntityRef::new("app.billing.Order", InstanceId::new());
        assert!(AuditAll.is_field_audited(&entity, "anything"));
    }
}

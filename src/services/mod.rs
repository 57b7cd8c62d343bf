//! Audit core services
//!
//! The data-bearing services are synchronous and side-effect-free: each call
//! is a pure function of the entity state, metadata and policy it is given.
//! They hold a borrowed backend reference and no other state, so concurrent
//! calls over different entities are independent.

pub mod actor;
pub mod diff;
pub mod identity;
pub mod normalizer;
pub mod summarizer;

pub use actor::ActorContextCollector;
pub use diff::DiffEngine;
pub use identity::IdentityResolver;
pub use normalizer::ValueNormalizer;
pub use summarizer::EntitySummarizer;

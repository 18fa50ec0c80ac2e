//! Domain Layer
//!
//! Entities, value objects, store traits and the access policy.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{AuthenticatedIdentity, CredentialRecord};
pub use policy::{AccessPolicy, Operation};
pub use repository::{CredentialStore, CredentialWriter};

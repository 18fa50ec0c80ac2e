//! Entities

pub mod authenticated_identity;
pub mod credential_record;

pub use authenticated_identity::AuthenticatedIdentity;
pub use credential_record::CredentialRecord;

//! Store Traits
//!
//! Interfaces for credential persistence. Implementations are in the infra layer.

use crate::domain::entity::credential_record::CredentialRecord;
use crate::domain::value_object::username::Username;
use crate::error::StoreResult;

/// Read side, the only thing authentication needs
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Find the record for a username (canonical match)
    ///
    /// `Ok(None)` is the ordinary not-found outcome. Never yields more than
    /// one record; an implementation that observes duplicates must report
    /// [`StoreError::Corrupted`](crate::error::StoreError::Corrupted).
    async fn find_by_username(&self, username: &Username) -> StoreResult<Option<CredentialRecord>>;
}

/// Write side, used by provisioning
#[trait_variant::make(CredentialWriter: Send)]
pub trait LocalCredentialWriter {
    /// Insert a new record, rejecting a username that is already taken
    async fn insert(&self, record: &CredentialRecord) -> StoreResult<()>;

    /// Delete the record for a username. Returns whether one existed.
    async fn delete_by_username(&self, username: &Username) -> StoreResult<bool>;
}

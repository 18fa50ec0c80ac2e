//! In-memory credential store
//!
//! Keyed by canonical username, so the map itself enforces uniqueness.
//! Used for development runs without a database and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::credential_record::CredentialRecord;
use crate::domain::repository::{CredentialStore, CredentialWriter};
use crate::domain::value_object::username::Username;
use crate::error::{StoreError, StoreResult};

#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    records: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &Username) -> StoreResult<Option<CredentialRecord>> {
        Ok(self.records.read().await.get(username.canonical()).cloned())
    }
}

impl CredentialWriter for MemoryCredentialStore {
    async fn insert(&self, record: &CredentialRecord) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let key = record.username.canonical();
        if records.contains_key(key) {
            return Err(StoreError::DuplicateUsername);
        }
        records.insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn delete_by_username(&self, username: &Username) -> StoreResult<bool> {
        Ok(self
            .records
            .write()
            .await
            .remove(username.canonical())
            .is_some())
    }
}

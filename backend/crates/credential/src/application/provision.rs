//! Provision Use Case
//!
//! Creates and removes credential records. This is the only write path, and
//! the place where username uniqueness and hashed-only storage are enforced.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::credential_record::CredentialRecord;
use crate::domain::repository::CredentialWriter;
use crate::domain::value_object::{
    CredentialId,
    role::Role,
    secret::{RawSecret, SecretHash},
    username::Username,
};
use crate::error::{AuthError, AuthResult};

/// Provision input
pub struct ProvisionInput {
    pub username: String,
    /// Plaintext secret, hashed before anything is stored
    pub secret: String,
    pub role: String,
}

/// Provision output
#[derive(Debug, Clone)]
pub struct ProvisionOutput {
    pub id: CredentialId,
    pub username: Username,
    pub role: Role,
}

pub struct ProvisionUseCase<W>
where
    W: CredentialWriter,
{
    writer: Arc<W>,
    config: Arc<AuthConfig>,
}

impl<W> ProvisionUseCase<W>
where
    W: CredentialWriter + Send + Sync + 'static,
{
    pub fn new(writer: Arc<W>, config: Arc<AuthConfig>) -> Self {
        Self { writer, config }
    }

    pub async fn execute(&self, input: ProvisionInput) -> AuthResult<ProvisionOutput> {
        let ProvisionInput {
            username,
            secret,
            role,
        } = input;

        let username = Username::new(username)?;
        let role = Role::new(role)?;
        let raw = RawSecret::new(secret)?;

        let config = self.config.clone();
        let secret_hash =
            tokio::task::spawn_blocking(move || SecretHash::from_raw(&raw, config.pepper()))
                .await
                .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))??;

        let record = CredentialRecord::new(username, secret_hash, role);
        self.writer.insert(&record).await?;

        tracing::info!(
            credential_id = %record.id,
            username = %record.username,
            role = %record.role,
            "Credential provisioned"
        );

        Ok(ProvisionOutput {
            id: record.id,
            username: record.username,
            role: record.role,
        })
    }

    /// Remove the record for `username`
    pub async fn revoke(&self, username: &str) -> AuthResult<()> {
        let username = Username::for_lookup(username).map_err(|_| AuthError::UnknownUser)?;

        if !self.writer.delete_by_username(&username).await? {
            return Err(AuthError::UnknownUser);
        }

        tracing::info!(username = %username, "Credential revoked");
        Ok(())
    }
}

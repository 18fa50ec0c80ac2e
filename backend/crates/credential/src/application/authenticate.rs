//! Authenticate Use Case
//!
//! Resolves a username to its stored record, verifies the claimed secret and
//! returns the caller's identity.

use std::sync::Arc;
use std::time::Duration;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    authenticated_identity::AuthenticatedIdentity, credential_record::CredentialRecord,
};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    secret::{RawSecret, SecretHash},
    username::Username,
};
use crate::error::{AuthError, AuthResult};

/// Stateless credential check over a [`CredentialStore`]
///
/// Holds no mutable state, so one instance can serve any number of
/// concurrent callers behind an `Arc`.
pub struct Authenticator<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> Authenticator<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }

    /// Authenticate with the configured lookup timeout
    pub async fn authenticate(
        &self,
        username: &str,
        secret: &str,
    ) -> AuthResult<AuthenticatedIdentity> {
        self.authenticate_within(username, secret, self.config.lookup_timeout)
            .await
    }

    /// Authenticate, bounding the store lookup by `timeout`
    ///
    /// ## Errors
    /// - `UnknownUser` - no record for the username (or it is empty / too long)
    /// - `InvalidSecret` - record found, secret does not match
    /// - `StoreUnavailable` - lookup failed or exceeded `timeout`
    pub async fn authenticate_within(
        &self,
        username: &str,
        secret: &str,
        timeout: Duration,
    ) -> AuthResult<AuthenticatedIdentity> {
        let claim = RawSecret::claim(secret);

        // Lenient key: stored names may predate the current provisioning rules
        let Ok(username) = Username::for_lookup(username) else {
            self.burn_verification(claim).await?;
            return Err(AuthError::UnknownUser);
        };

        let Some(record) = self.lookup(&username, timeout).await? else {
            self.burn_verification(claim).await?;
            return Err(AuthError::UnknownUser);
        };

        if !self.verify(&record, claim).await? {
            return Err(AuthError::InvalidSecret);
        }

        tracing::debug!(username = %record.username, role = %record.role, "Credential verified");

        Ok(record.identity())
    }

    async fn lookup(
        &self,
        username: &Username,
        timeout: Duration,
    ) -> AuthResult<Option<CredentialRecord>> {
        match tokio::time::timeout(timeout, self.store.find_by_username(username)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AuthError::StoreUnavailable(format!(
                "lookup exceeded {} ms",
                timeout.as_millis()
            ))),
        }
    }

    /// Argon2 verification on the blocking pool
    async fn verify(&self, record: &CredentialRecord, claim: RawSecret) -> AuthResult<bool> {
        let hash: SecretHash = record.secret_hash.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || hash.verify(&claim, config.pepper()))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))
    }

    /// Same Argon2 cost as [`Self::verify`], result discarded
    async fn burn_verification(&self, claim: RawSecret) -> AuthResult<()> {
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || claim.verify_against_dummy(config.pepper()))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))
    }
}

impl<S> Clone for Authenticator<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

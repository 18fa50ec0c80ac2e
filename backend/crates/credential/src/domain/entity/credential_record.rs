//! Credential Record Entity
//!
//! The stored username / secret hash / role triple. Owned by the store;
//! everything else only ever sees transient copies.

use chrono::{DateTime, Utc};

use crate::domain::entity::authenticated_identity::AuthenticatedIdentity;
use crate::domain::value_object::{
    CredentialId, role::Role, secret::SecretHash, username::Username,
};

#[derive(Debug, Clone)]
pub struct CredentialRecord {
    /// Assigned at creation, never changes
    pub id: CredentialId,
    /// Unique (canonical form) lookup key
    pub username: Username,
    /// Argon2id PHC string
    pub secret_hash: SecretHash,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(username: Username, secret_hash: SecretHash, role: Role) -> Self {
        Self {
            id: CredentialId::new(),
            username,
            secret_hash,
            role,
            created_at: Utc::now(),
        }
    }

    /// Identity handed out after a successful verification
    pub fn identity(&self) -> AuthenticatedIdentity {
        AuthenticatedIdentity::new(self.username.clone(), self.role.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::secret::RawSecret;

    #[test]
    fn test_identity_carries_username_and_role() {
        let hash = SecretHash::from_raw(&RawSecret::claim("pw123"), None).unwrap();
        let record = CredentialRecord::new(Username::new("Alice").unwrap(), hash, Role::admin());

        let identity = record.identity();
        assert_eq!(identity.username().original(), "Alice");
        assert_eq!(identity.role(), &Role::admin());
    }

    #[test]
    fn test_new_records_get_distinct_ids() {
        let hash = SecretHash::from_raw(&RawSecret::claim("pw123"), None).unwrap();
        let a = CredentialRecord::new(Username::new("alice").unwrap(), hash.clone(), Role::user());
        let b = CredentialRecord::new(Username::new("bob").unwrap(), hash, Role::user());
        assert_ne!(a.id, b.id);
    }
}

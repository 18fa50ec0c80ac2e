//! Secret Value Objects
//!
//! Domain wrappers around `platform::password`.
//!
//! - [`RawSecret`] is what a caller hands in. Zeroized on drop.
//! - [`SecretHash`] is what a credential record stores. Argon2id PHC string.

use platform::password::{self, ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Secret (caller input)
// ============================================================================

pub struct RawSecret(ClearTextPassword);

impl RawSecret {
    /// Secret being provisioned; the creation policy applies
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        Ok(Self(ClearTextPassword::new(raw.into())?))
    }

    /// Secret claimed during authentication; no policy, any string is accepted
    pub fn claim(raw: impl Into<String>) -> Self {
        Self(ClearTextPassword::claim(raw.into()))
    }

    /// Burn one verification's worth of work against a throwaway hash
    pub fn verify_against_dummy(&self, pepper: Option<&[u8]>) {
        password::verify_against_dummy(&self.0, pepper);
    }
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawSecret").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Secret Hash (stored)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(HashedPassword);

impl SecretHash {
    /// Hash a raw secret for storage
    ///
    /// `pepper` must be supplied again, unchanged, on every verification.
    pub fn from_raw(raw: &RawSecret, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, password::PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification of a claimed secret
    pub fn verify(&self, raw: &RawSecret, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretHash").field("hash", &"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enforces_policy() {
        assert!(matches!(
            RawSecret::new("pw123"),
            Err(AuthError::SecretPolicy(_))
        ));
        assert!(RawSecret::new("Correct-Horse-42").is_ok());
    }

    #[test]
    fn test_claim_accepts_anything() {
        let _ = RawSecret::claim("");
        let _ = RawSecret::claim("pw123");
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawSecret::new("Correct-Horse-42").unwrap();
        let hash = SecretHash::from_raw(&raw, None).unwrap();

        assert!(hash.verify(&RawSecret::claim("Correct-Horse-42"), None));
        assert!(!hash.verify(&RawSecret::claim("correct-horse-42"), None));
    }

    #[test]
    fn test_phc_string_is_not_plaintext() {
        let raw = RawSecret::claim("pw123");
        let hash = SecretHash::from_raw(&raw, None).unwrap();
        assert!(hash.as_phc_string().starts_with("$argon2id$"));
        assert!(!hash.as_phc_string().contains("pw123"));

        let restored = SecretHash::from_phc_string(hash.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawSecret::claim("TopSecret");
        assert!(!format!("{:?}", raw).contains("TopSecret"));

        let hash = SecretHash::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hash).contains("argon2"));
    }
}

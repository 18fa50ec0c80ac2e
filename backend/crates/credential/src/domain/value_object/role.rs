use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROLE_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    #[error("Role cannot be empty")]
    Empty,

    #[error("Role is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Role may only contain A-Z, 0-9 and '_' (got '{0}')")]
    InvalidCharacter(char),
}

/// Authorization level tag attached to a credential record
///
/// A free-form tag such as `USER` or `ADMIN`. New tags are written upper case;
/// tags read back from storage are returned exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[display("{_0}")]
pub struct Role(String);

impl Role {
    pub const USER: &'static str = "USER";
    pub const ADMIN: &'static str = "ADMIN";

    /// Parse a role tag, upper-casing the input
    pub fn new(input: impl AsRef<str>) -> Result<Self, RoleError> {
        let tag = input.as_ref().trim().to_ascii_uppercase();

        if tag.is_empty() {
            return Err(RoleError::Empty);
        }

        let length = tag.chars().count();
        if length > ROLE_MAX_LENGTH {
            return Err(RoleError::TooLong {
                length,
                max: ROLE_MAX_LENGTH,
            });
        }

        if let Some(ch) = tag
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(RoleError::InvalidCharacter(ch));
        }

        Ok(Self(tag))
    }

    /// Rebuild from a stored value, verbatim
    pub fn from_db(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn user() -> Self {
        Self(Self::USER.to_string())
    }

    pub fn admin() -> Self {
        Self(Self::ADMIN.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Role {
    type Error = RoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_new_uppercases() {
        assert_eq!(Role::new("admin").unwrap(), Role::admin());
        assert_eq!(Role::new(" user ").unwrap(), Role::user());
        assert_eq!(Role::new("super_admin").unwrap().as_str(), "SUPER_ADMIN");
    }

    #[test]
    fn test_role_validation() {
        assert_eq!(Role::new("").unwrap_err(), RoleError::Empty);
        assert_eq!(Role::new("read-only").unwrap_err(), RoleError::InvalidCharacter('-'));
        assert!(matches!(
            Role::new("R".repeat(ROLE_MAX_LENGTH + 1)),
            Err(RoleError::TooLong { .. })
        ));
    }

    #[test]
    fn test_role_from_db_is_verbatim() {
        let role = Role::from_db("Legacy-Role");
        assert_eq!(role.as_str(), "Legacy-Role");
        assert_ne!(role, Role::new("legacy_role").unwrap());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::admin().to_string(), "ADMIN");
        assert_eq!(Role::user().to_string(), "USER");
    }
}

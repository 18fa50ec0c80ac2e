//! Username Value Object
//!
//! The username is the lookup key of a credential record.
//!
//! ## Policy
//! - Input is NFKC-normalized and surrounding whitespace is trimmed
//! - Matching is case-insensitive: uniqueness and lookups use a lowercase
//!   canonical form, the original spelling is kept for display
//! - ASCII letters, digits and `_ . - + @` only; no interior whitespace
//! - Length 3..=64 characters after normalization
//! - Starts and ends with a letter, digit or `_`; no `..`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 64;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+', '@'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("User name cannot contain whitespace")]
    ContainsWhitespace,

    #[error("Invalid character '{char}' at position {position}")]
    InvalidCharacter { char: char, position: usize },

    #[error("User name must start and end with a letter, digit or '_'")]
    InvalidBoundary,

    #[error("User name cannot contain consecutive dots (..)")]
    ConsecutiveDots,
}

/// Validated, normalized username
///
/// Equality and hashing use the canonical form only, so `Alice` and `alice`
/// are the same key.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username {
    /// Trimmed, NFKC-normalized input (preserves case)
    original: String,
    /// Lowercase form used as the store key
    canonical: String,
}

impl Username {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Lookup key for a claimed name
    ///
    /// Normalizes like [`Username::new`] but only bounds the length, so names
    /// stored under older, looser rules can still be found.
    pub fn for_lookup(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        if original.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = original.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from a stored value
    ///
    /// Stored names were validated when written. They are not re-validated;
    /// together with [`Username::for_lookup`] this keeps accounts created
    /// under older rules reachable.
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(canonical: &str) -> Result<(), UsernameError> {
        if canonical.is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort {
                length,
                min: USERNAME_MIN_LENGTH,
            });
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        if canonical.chars().any(char::is_whitespace) {
            return Err(UsernameError::ContainsWhitespace);
        }

        for (position, ch) in canonical.chars().enumerate() {
            if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&ch))
            {
                return Err(UsernameError::InvalidCharacter { char: ch, position });
            }
        }

        let boundary_ok = |c: Option<char>| {
            c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        };
        if !boundary_ok(canonical.chars().next()) || !boundary_ok(canonical.chars().next_back()) {
            return Err(UsernameError::InvalidBoundary);
        }

        if canonical.contains("..") {
            return Err(UsernameError::ConsecutiveDots);
        }

        Ok(())
    }
}

impl PartialEq for Username {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Username {}

impl std::hash::Hash for Username {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&self.canonical, state);
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.original).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.original
    }
}

//! Value Object Module

pub mod role;
pub mod secret;
pub mod username;

pub use kernel::id::CredentialId;
pub use role::{Role, RoleError};
pub use secret::{RawSecret, SecretHash};
pub use username::{Username, UsernameError};

//! Credential Verification and Role Resolution
//!
//! Layered structure:
//! - `domain/` - Credential records, value objects, store traits, access policy
//! - `application/` - Use cases (authenticate, provision) and configuration
//! - `infra/` - Store implementations (in-memory, PostgreSQL)
//!
//! ## Flow
//! caller -> [`Authenticator::authenticate`] -> [`CredentialStore::find_by_username`]
//! -> Argon2id verification -> [`AuthenticatedIdentity`] or [`AuthError`]
//!
//! ## Security Model
//! - Secrets stored only as Argon2id PHC strings, optional pepper
//! - Unknown user and wrong secret share one message and comparable timing
//! - Store lookups bounded by a timeout; failures surface as `StoreUnavailable`,
//!   never as an authentication failure
//! - Authorization is an explicit [`AccessPolicy`] value (role -> operations)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::authenticate::Authenticator;
pub use application::config::AuthConfig;
pub use application::provision::{ProvisionInput, ProvisionOutput, ProvisionUseCase};
pub use domain::entity::{AuthenticatedIdentity, CredentialRecord};
pub use domain::policy::{AccessPolicy, Operation};
pub use domain::repository::{CredentialStore, CredentialWriter};
pub use error::{AccessError, AuthError, AuthResult, StoreError, StoreResult};
pub use infra::memory::MemoryCredentialStore;
pub use infra::postgres::PgCredentialStore;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

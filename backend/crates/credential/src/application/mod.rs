//! Application Layer
//!
//! Use cases and configuration.

pub mod authenticate;
pub mod config;
pub mod provision;

// Re-exports
pub use authenticate::Authenticator;
pub use config::AuthConfig;
pub use provision::{ProvisionInput, ProvisionOutput, ProvisionUseCase};

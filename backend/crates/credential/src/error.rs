//! Credential Error Types
//!
//! Store, authentication and access errors. Each maps onto the unified
//! `kernel::error::AppError` for outer layers.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

use crate::domain::policy::Operation;
use crate::domain::value_object::{
    role::{Role, RoleError},
    username::UsernameError,
};

pub type AuthResult<T> = Result<T, AuthError>;
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Store errors
// ============================================================================

/// Failures reported by a [`CredentialStore`](crate::domain::repository::CredentialStore)
///
/// "Not found" is not an error; lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable, timed out or failed mid-operation
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    /// Write rejected because the username is taken
    #[error("User name already exists")]
    DuplicateUsername,

    /// Stored data violates a record invariant
    #[error("Credential store holds invalid data: {0}")]
    Corrupted(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateUsername
            }
            // Schema or wire mismatch: retrying will not help
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::Protocol(_) => StoreError::Corrupted(err.to_string()),
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

// ============================================================================
// Authentication errors
// ============================================================================

/// Authentication and provisioning errors
///
/// `UnknownUser` and `InvalidSecret` render the same message so callers that
/// surface `to_string()` cannot reveal which usernames exist. Code can still
/// tell them apart by variant.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No record for the username
    #[error("Invalid credentials")]
    UnknownUser,

    /// Record exists, secret does not match
    #[error("Invalid credentials")]
    InvalidSecret,

    /// Store failed or timed out; retrying the whole call may succeed
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("User name already exists")]
    UsernameTaken,

    #[error("Invalid user name: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Secret rejected: {0}")]
    SecretPolicy(#[from] PasswordPolicyError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// True for the two outcomes of a well-formed but failed login
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::UnknownUser | AuthError::InvalidSecret)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UnknownUser | AuthError::InvalidSecret => ErrorKind::Unauthorized,
            AuthError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::InvalidUsername(_)
            | AuthError::InvalidRole(_)
            | AuthError::SecretPolicy(_) => ErrorKind::BadRequest,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::UnknownUser | AuthError::InvalidSecret => {
                AppError::unauthorized(self.to_string())
            }
            AuthError::StoreUnavailable(_) => {
                AppError::service_unavailable("Credential store unavailable")
                    .with_action("Please try again later")
            }
            AuthError::UsernameTaken => AppError::conflict(self.to_string()),
            AuthError::InvalidUsername(_)
            | AuthError::InvalidRole(_)
            | AuthError::SecretPolicy(_) => AppError::bad_request(self.to_string()),
            AuthError::Internal(_) => AppError::internal("Internal error"),
        }
    }

    /// Log the error with an appropriate level. Never logs secrets.
    pub fn log(&self) {
        match self {
            AuthError::StoreUnavailable(reason) => {
                tracing::error!(reason = %reason, "Credential store unavailable");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Credential internal error");
            }
            AuthError::UnknownUser => {
                tracing::warn!(failure = "unknown_user", "Invalid login attempt");
            }
            AuthError::InvalidSecret => {
                tracing::warn!(failure = "invalid_secret", "Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Credential request rejected");
            }
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => AuthError::StoreUnavailable(reason),
            StoreError::DuplicateUsername => AuthError::UsernameTaken,
            StoreError::Corrupted(detail) => AuthError::Internal(detail),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

// ============================================================================
// Access errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role {role} may not perform '{operation}'")]
    Forbidden { role: Role, operation: Operation },

    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),
}

impl AccessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::Unauthenticated => ErrorKind::Unauthorized,
            AccessError::Forbidden { .. } => ErrorKind::Forbidden,
            AccessError::UnknownOperation(_) => ErrorKind::NotFound,
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => {
                AppError::unauthorized(err.to_string()).with_action("Sign in first")
            }
            AccessError::Forbidden { .. } => AppError::forbidden(err.to_string()),
            AccessError::UnknownOperation(_) => AppError::new(err.kind(), err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_share_message() {
        assert_eq!(AuthError::UnknownUser.to_string(), AuthError::InvalidSecret.to_string());
        assert_eq!(
            AuthError::UnknownUser.to_app_error().to_string(),
            AuthError::InvalidSecret.to_app_error().to_string()
        );
        assert!(AuthError::UnknownUser.is_auth_failure());
        assert!(AuthError::InvalidSecret.is_auth_failure());
    }

    #[test]
    fn test_store_unavailable_is_not_auth_failure() {
        let err = AuthError::StoreUnavailable("connection refused".into());
        assert!(!err.is_auth_failure());
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert!(err.kind().is_transient());
        // Infrastructure detail stays out of the outward message
        assert!(!err.to_app_error().message().contains("refused"));
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AuthError::from(StoreError::Unavailable("x".into())),
            AuthError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AuthError::from(StoreError::DuplicateUsername),
            AuthError::UsernameTaken
        ));
        assert!(matches!(
            AuthError::from(StoreError::Corrupted("x".into())),
            AuthError::Internal(_)
        ));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_sqlx_schema_mismatch_is_not_transient() {
        let mismatches = [
            sqlx::Error::ColumnNotFound("secret_hash".into()),
            sqlx::Error::TypeNotFound {
                type_name: "credential_role".into(),
            },
            sqlx::Error::Protocol("unexpected message".into()),
        ];

        for err in mismatches {
            let store_err = StoreError::from(err);
            assert!(matches!(store_err, StoreError::Corrupted(_)), "{store_err}");

            let auth_err = AuthError::from(store_err);
            assert_eq!(auth_err.kind(), ErrorKind::InternalServerError);
            assert!(!auth_err.kind().is_transient());
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::UnknownUser.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::UsernameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(
            AuthError::from(PasswordPolicyError::CommonPattern).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(AccessError::Unauthenticated.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AppError::from(AccessError::Forbidden {
                role: Role::user(),
                operation: Operation::ViewLoans
            })
            .status_code(),
            403
        );
    }
}

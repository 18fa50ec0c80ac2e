//! Application Configuration

use std::time::Duration;

/// Credential application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Upper bound on a single store lookup
    pub lookup_timeout: Duration,
    /// Password pepper (optional, application-wide secret)
    pub secret_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(5),
            secret_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Short timeout, no pepper
    pub fn development() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(1),
            ..Default::default()
        }
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.secret_pepper = Some(pepper.into());
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.secret_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("lookup_timeout", &self.lookup_timeout)
            .field("secret_pepper", &self.secret_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

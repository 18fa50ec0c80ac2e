//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that carry no domain meaning:
//! - Secret hashing and verification (Argon2id, NIST SP 800-63B creation policy)

pub mod password;

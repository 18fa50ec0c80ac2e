//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - Unified error type ([`error::app_error::AppError`]) and its classification
//! - Typed identifiers ([`id::Id`])
//!
//! Only things with a stable meaning across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

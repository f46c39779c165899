//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Response codes and the `{code, msg, data}` envelope
//! - Common error types and result aliases
//! - Typed integer IDs for stored records
//! - Offset pagination
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod code;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
pub mod response;

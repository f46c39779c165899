//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Signed, time-bounded access tokens
//! - Declarative request validation
//! - Wall clock abstraction
//! - Image upload policy
//! - Request header helpers

pub mod clock;
pub mod crypto;
pub mod header;
pub mod token;
pub mod upload;
pub mod validation;

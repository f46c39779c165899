//! Value Objects

pub mod password_digest;

pub use password_digest::PasswordDigest;

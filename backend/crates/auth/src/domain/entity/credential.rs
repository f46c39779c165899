//! Credential Entity
//!
//! A provisioned username with its password digest. Credentials are
//! created out of band (migrations / operators) and never mutated here.

use crate::domain::value_object::password_digest::PasswordDigest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: PasswordDigest,
}

impl Credential {
    /// Build from the plaintext pair submitted by a client
    pub fn from_plain(username: impl Into<String>, password: &str) -> Self {
        Self {
            username: username.into(),
            password: PasswordDigest::from_plain(password),
        }
    }
}

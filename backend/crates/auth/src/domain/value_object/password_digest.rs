//! Password Digest Value Object
//!
//! Lowercase hex SHA-256 of the plaintext password. This is the form stored
//! in the credential table and embedded in issued tokens.

use platform::crypto::sha256_hex;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn from_plain(password: &str) -> Self {
        Self(sha256_hex(password.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep digests out of logs
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            PasswordDigest::from_plain("test123").as_str(),
            "ecd71870d1963316a97e3ac3408c9835ad8cf0f3c1bc703527c30265534f75ae"
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let d = PasswordDigest::from_plain("secret");
        assert_eq!(format!("{d:?}"), "PasswordDigest(..)");
    }
}

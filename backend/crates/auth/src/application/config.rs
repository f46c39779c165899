//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::crypto::random_bytes;
use platform::token::TokenSigner;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Request header carrying the token
    pub token_header: String,
    /// HMAC key for token signatures. Empty means signing is unavailable.
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (3 hours)
    pub token_ttl: Duration,
    /// `iss` claim
    pub issuer: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_header", &self.token_header)
            .field("token_ttl", &self.token_ttl)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_header: "token".to_string(),
            jwt_secret: Vec::new(),
            token_ttl: Duration::from_secs(3 * 3600), // 3 hours
            issuer: "blog-api".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing key (for development)
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Build the token signer for this configuration
    pub fn signer(&self) -> TokenSigner {
        let ttl = chrono::Duration::from_std(self.token_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(3));
        TokenSigner::new(self.jwt_secret.clone(), self.issuer.clone(), ttl)
    }
}

//! Signed Access Tokens
//!
//! Compact `header.payload.signature` tokens signed with HMAC-SHA256
//! (the JWT `HS256` layout). Tokens are stateless: verification recomputes
//! the signature and checks expiry, nothing is stored server-side.
//!
//! The claims carry the caller's password digest, so rotating a password
//! does not invalidate tokens issued before the rotation. They stay valid
//! until `exp`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

const ALGORITHM: &str = "HS256";

/// Token failure modes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No signing key configured
    #[error("Signing key unavailable")]
    Signing,

    /// Undecodable structure or signature mismatch
    #[error("Malformed token")]
    Malformed,

    /// Signature valid, but `now >= exp`
    #[error("Token expired")]
    Expired,
}

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub password_hash: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    pub iss: String,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Issues and verifies tokens with one key, issuer and lifetime
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    issuer: String,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Issue a token valid from `now` until `now + ttl`
    pub fn issue(
        &self,
        username: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if self.secret.is_empty() {
            return Err(TokenError::Signing);
        }

        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };
        let claims = Claims {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        let header = serde_json::to_vec(&header).map_err(|_| TokenError::Signing)?;
        let claims = serde_json::to_vec(&claims).map_err(|_| TokenError::Signing)?;

        let signing_input = format!("{}.{}", to_base64url(&header), to_base64url(&claims));
        let signature =
            hmac_sha256(&self.secret, signing_input.as_bytes()).ok_or(TokenError::Signing)?;

        Ok(format!("{}.{}", signing_input, to_base64url(&signature)))
    }

    /// Verify signature, then expiry
    ///
    /// Succeeds only while `now < exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::Malformed);
        }

        let signature = from_base64url(signature_b64).map_err(|_| TokenError::Malformed)?;
        let signing_input_len = header_b64.len() + 1 + claims_b64.len();
        let signing_input = &token[..signing_input_len];
        if !verify_hmac_sha256(&self.secret, signing_input.as_bytes(), &signature) {
            return Err(TokenError::Malformed);
        }

        let claims: Claims = decode_segment(claims_b64)?;
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = from_base64url(segment).map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

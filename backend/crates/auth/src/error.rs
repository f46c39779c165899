//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::Code, kind::ErrorKind};
use platform::token::TokenError;
use platform::validation::Violations;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request fields failed validation
    #[error("Invalid parameters: {0}")]
    InvalidParams(Violations),

    /// No token header on a guarded request
    #[error("Missing token header")]
    MissingToken,

    /// Token could not be decoded or its signature does not match
    #[error("Token verification failed")]
    TokenInvalid,

    /// Token signature is valid but it has expired
    #[error("Token expired")]
    TokenExpired,

    /// Unknown username/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token could not be signed
    #[error("Token signing failed")]
    TokenSigning,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidParams(_) => ErrorKind::InvalidParams,
            AuthError::MissingToken
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::TokenSigning | AuthError::Database(_) => ErrorKind::Internal,
        }
    }

    /// Response code carried in the envelope
    pub fn code(&self) -> Code {
        match self {
            AuthError::InvalidParams(_) | AuthError::MissingToken => Code::InvalidParams,
            AuthError::TokenInvalid => Code::AuthCheckTokenFail,
            AuthError::TokenExpired => Code::AuthCheckTokenTimeout,
            AuthError::InvalidCredentials => Code::Auth,
            AuthError::TokenSigning => Code::AuthToken,
            // Lookup failure during sign-in keeps the token-check code
            AuthError::Database(_) => Code::AuthCheckTokenFail,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.code()).with_detail(self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::TokenSigning => {
                tracing::error!("Token signing key unavailable");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected token with bad signature or structure");
            }
            AuthError::InvalidParams(v) => v.log(),
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing => AuthError::TokenSigning,
            TokenError::Malformed => AuthError::TokenInvalid,
            TokenError::Expired => AuthError::TokenExpired,
        }
    }
}

impl From<Violations> for AuthError {
    fn from(v: Violations) -> Self {
        AuthError::InvalidParams(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_rejections_are_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::TokenInvalid,
            AuthError::TokenExpired,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::MissingToken.code(), Code::InvalidParams);
        assert_eq!(AuthError::TokenInvalid.code(), Code::AuthCheckTokenFail);
        assert_eq!(AuthError::TokenExpired.code(), Code::AuthCheckTokenTimeout);
        assert_eq!(AuthError::TokenSigning.code(), Code::AuthToken);
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::TokenExpired
        ));
        assert!(matches!(
            AuthError::from(TokenError::Malformed),
            AuthError::TokenInvalid
        ));
    }
}

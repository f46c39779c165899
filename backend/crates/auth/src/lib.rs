//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Credentials, value objects, repository traits
//! - `application/` - Token issuance and the request gate
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - `GET /auth` and `POST /auth` exchange a username/password pair for a
//!   signed, time-bounded token
//! - `require_token` middleware guards routes with the `token` header
//!
//! ## Security Model
//! - Passwords are compared as SHA-256 digests
//! - Tokens are stateless HS256; there is no revocation, only expiry
//! - Any valid token authorizes any guarded route

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgCredentialRepository;
pub use presentation::middleware::{TokenGateState, require_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

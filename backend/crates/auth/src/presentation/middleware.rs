//! Auth Middleware
//!
//! Gate for routes that require a valid `token` header.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::clock::Clock;
use std::sync::Arc;

use crate::application::VerifyTokenUseCase;
use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct TokenGateState {
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

/// Middleware that requires a valid, unexpired token
///
/// Verified claims are stored in request extensions.
pub async fn require_token(
    State(state): State<TokenGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let use_case = VerifyTokenUseCase::new(state.config.clone(), state.clock.clone());

    let claims = use_case.execute(req.headers())?;
    tracing::debug!(username = %claims.username, "Token accepted");

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

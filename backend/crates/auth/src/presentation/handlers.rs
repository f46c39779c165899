//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use kernel::response::Envelope;
use platform::clock::Clock;
use platform::validation::{Validate, Violations};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{GetTokenInput, GetTokenUseCase};
use crate::domain::repository::CredentialRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthRequest, TokenResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

// ============================================================================
// Get Token
// ============================================================================

/// GET /auth?username=&password=
pub async fn get_token_query<R>(
    State(state): State<AuthAppState<R>>,
    req: Result<Query<AuthRequest>, QueryRejection>,
) -> AuthResult<Envelope<TokenResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let Query(req) =
        req.map_err(|e| AuthError::InvalidParams(Violations::single("query", e.body_text())))?;
    get_token(state, req).await
}

/// POST /auth
pub async fn get_token_json<R>(
    State(state): State<AuthAppState<R>>,
    req: Result<Json<AuthRequest>, JsonRejection>,
) -> AuthResult<Envelope<TokenResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let Json(req) =
        req.map_err(|e| AuthError::InvalidParams(Violations::single("body", e.body_text())))?;
    get_token(state, req).await
}

async fn get_token<R>(state: AuthAppState<R>, req: AuthRequest) -> AuthResult<Envelope<TokenResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    req.validate()?;

    let use_case = GetTokenUseCase::new(state.repo.clone(), state.config.clone(), state.clock.clone());

    let input = GetTokenInput {
        username: req.username.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok(Envelope::success(TokenResponse {
        token: output.token,
    }))
}

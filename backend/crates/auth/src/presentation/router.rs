//! Auth Router

use axum::{Router, routing::get};
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialRepository;
use crate::infra::postgres::PgCredentialRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgCredentialRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(repo, config, Arc::new(SystemClock))
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        clock,
    };

    Router::new()
        .route(
            "/auth",
            get(handlers::get_token_query::<R>).post(handlers::get_token_json::<R>),
        )
        .with_state(state)
}

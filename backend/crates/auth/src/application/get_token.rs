//! Get Token Use Case
//!
//! Exchanges a username/password pair for a signed access token.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::error::{AuthError, AuthResult};

/// Validated sign-in input
pub struct GetTokenInput {
    pub username: String,
    pub password: String,
}

pub struct GetTokenOutput {
    pub token: String,
}

/// Get token use case
pub struct GetTokenUseCase<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> GetTokenUseCase<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: GetTokenInput) -> AuthResult<GetTokenOutput> {
        let credential = Credential::from_plain(input.username, &input.password);

        if !self.repo.exists(&credential).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.config.signer().issue(
            &credential.username,
            credential.password.as_str(),
            self.clock.now(),
        )?;

        tracing::info!(username = %credential.username, "Token issued");

        Ok(GetTokenOutput { token })
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::credential::Credential;
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Whether a credential with this exact username and digest is provisioned
    async fn exists(&self, credential: &Credential) -> AuthResult<bool>;
}

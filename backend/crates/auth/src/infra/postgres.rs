//! PostgreSQL Repository Implementations

use sqlx::PgPool;

use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialRepository {
    pool: PgPool,
    table: String,
}

impl PgCredentialRepository {
    /// `table_prefix` is prepended to `auth`, e.g. `blog_` gives `blog_auth`
    pub fn new(pool: PgPool, table_prefix: &str) -> Self {
        Self {
            pool,
            table: format!("{table_prefix}auth"),
        }
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgCredentialRepository {
    async fn exists(&self, credential: &Credential) -> AuthResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE username = $1 AND password = $2)",
            self.table
        );

        let found = sqlx::query_scalar::<_, bool>(&sql)
            .bind(&credential.username)
            .bind(credential.password.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(found)
    }
}

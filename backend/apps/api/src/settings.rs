//! Process Settings
//!
//! Reads the environment once at startup and splits the result into the
//! per-crate configs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use auth::AuthConfig;
use blog::{BlogConfig, PurgeConfig};
use platform::upload::{ImagePolicy, parse_exts};
use sqlx::postgres::PgPoolOptions;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub table_prefix: String,
    pub db_max_open_conns: u32,
    pub db_min_conns: u32,
    pub http_port: u16,
    pub request_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub blog: BlogConfig,
}

/// Read `key`, falling back to `default` when unset or blank
fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
        let table_prefix = string_or("TABLE_PREFIX", "blog_");

        Ok(Self {
            database_url,
            db_max_open_conns: var_or("DB_MAX_OPEN_CONNS", 100)?,
            db_min_conns: var_or("DB_MIN_CONNS", 10)?,
            http_port: var_or("HTTP_PORT", 8000)?,
            request_timeout: Duration::from_secs(var_or("REQUEST_TIMEOUT_SECS", 60)?),
            frontend_origins: string_or("FRONTEND_ORIGINS", "http://localhost:8080")
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            auth: auth_config()?,
            blog: blog_config()?,
            table_prefix,
        })
    }

    /// Pool sizing. The warm floor never exceeds the ceiling.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.db_max_open_conns)
            .min_connections(self.db_min_conns.min(self.db_max_open_conns))
    }
}

fn auth_config() -> Result<AuthConfig> {
    let base = match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => AuthConfig {
            jwt_secret: secret.into_bytes(),
            ..AuthConfig::default()
        },
        _ if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random signing key");
            AuthConfig::development()
        }
        _ => bail!("JWT_SECRET must be set in production"),
    };

    Ok(AuthConfig {
        token_ttl: Duration::from_secs(var_or("TOKEN_TTL_SECS", 3 * 3600)?),
        ..base
    })
}

fn blog_config() -> Result<BlogConfig> {
    let max_size_mb: usize = var_or("IMAGE_MAX_SIZE_MB", 5)?;

    Ok(BlogConfig {
        page_size: var_or("PAGE_SIZE", 10)?,
        image: ImagePolicy {
            prefix_url: string_or("PREFIX_URL", "http://127.0.0.1:8000"),
            runtime_root: PathBuf::from(string_or("RUNTIME_ROOT_PATH", "runtime/")),
            save_path: string_or("IMAGE_SAVE_PATH", "upload/images/"),
            max_size: max_size_mb.saturating_mul(1024 * 1024),
            allow_exts: parse_exts(&string_or("IMAGE_ALLOW_EXTS", ".jpg,.jpeg,.png")),
        },
        purge: PurgeConfig {
            enabled: var_or("PURGE_ENABLED", true)?,
            cron: string_or("PURGE_CRON", "0 * * * * *"),
            retention: Duration::from_secs(var_or("PURGE_RETENTION_SECS", 0)?),
        },
    })
}

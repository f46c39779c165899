//! Application Configuration
//!
//! Configuration for the Blog application layer.

use std::time::Duration;

use platform::upload::ImagePolicy;

/// Soft-delete purge job settings
#[derive(Debug, Clone)]
pub struct PurgeConfig {
    pub enabled: bool,
    /// Six-field cron expression (seconds first)
    pub cron: String,
    /// Minimum age of a soft-deleted row before it is purged
    pub retention: Duration,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: "0 * * * * *".to_string(), // every minute
            retention: Duration::ZERO,
        }
    }
}

impl PurgeConfig {
    pub fn retention_secs(&self) -> i64 {
        i64::try_from(self.retention.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Blog application configuration
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Rows per list page
    pub page_size: u32,
    pub image: ImagePolicy,
    pub purge: PurgeConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            image: ImagePolicy::default(),
            purge: PurgeConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Request body bound for the upload route
    ///
    /// Leaves room for multipart framing so an oversized image still reaches
    /// the size check.
    pub fn upload_body_limit(&self) -> usize {
        self.image.max_size.saturating_add(64 * 1024)
    }
}

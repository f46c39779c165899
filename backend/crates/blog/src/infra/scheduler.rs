//! Purge Scheduler
//!
//! Runs the purge use case on a cron schedule, independent of request
//! handling. A failed run is logged and left to the next tick.

use std::sync::Arc;

use anyhow::Result;
use platform::clock::Clock;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::application::config::BlogConfig;
use crate::application::purge::PurgeUseCase;
use crate::domain::entities::{Article, Tag};
use crate::domain::lifecycle::TableWriter;
use crate::domain::repository::{ArticleRepository, TagRepository};

/// Start the purge job
///
/// Returns `None` when purging is disabled. The caller owns the scheduler
/// and shuts it down with the server.
pub async fn start_purge_scheduler<R>(
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    config: Arc<BlogConfig>,
) -> Result<Option<JobScheduler>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    if !config.purge.enabled {
        info!("Purge scheduler is disabled in config");
        return Ok(None);
    }

    let sched = JobScheduler::new().await?;
    let cron = config.purge.cron.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let use_case = PurgeUseCase::new(repo.clone(), clock.clone(), config.clone());
        Box::pin(async move {
            let start = std::time::Instant::now();
            info!(event = "job_started", job_name = "purge_soft_deleted", "Starting purge");

            match use_case.execute().await {
                Ok(out) => info!(
                    event = "job_finished",
                    job_name = "purge_soft_deleted",
                    tags_purged = out.tags,
                    articles_purged = out.articles,
                    duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Purge finished"
                ),
                Err(e) => error!(
                    event = "job_failed",
                    job_name = "purge_soft_deleted",
                    error = %e,
                    "Purge failed, retrying at next tick"
                ),
            }
        })
    })?;

    sched.add(job).await?;
    sched.start().await?;

    info!(cron = %cron, "Purge scheduler running");

    Ok(Some(sched))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryBlogRepository;
    use platform::clock::SystemClock;

    #[tokio::test]
    async fn test_disabled_scheduler_is_not_started() {
        let config = BlogConfig {
            purge: crate::application::config::PurgeConfig {
                enabled: false,
                ..Default::default()
            },
            ..BlogConfig::default()
        };
        let sched = start_purge_scheduler(
            Arc::new(MemoryBlogRepository::new()),
            Arc::new(SystemClock),
            Arc::new(config),
        )
        .await
        .unwrap();
        assert!(sched.is_none());
    }

    #[tokio::test]
    async fn test_invalid_cron_is_an_error() {
        let config = BlogConfig {
            purge: crate::application::config::PurgeConfig {
                cron: "not a cron".into(),
                ..Default::default()
            },
            ..BlogConfig::default()
        };
        let result = start_purge_scheduler(
            Arc::new(MemoryBlogRepository::new()),
            Arc::new(SystemClock),
            Arc::new(config),
        )
        .await;
        assert!(result.is_err());
    }
}

//! Purge Use Case
//!
//! Permanently removes soft-deleted tags and articles. Runs outside the
//! request path on a timer; only rows with `deleted_on != 0` are touched,
//! which live reads never return.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::article_service::ArticleService;
use crate::application::config::BlogConfig;
use crate::application::tag_service::TagService;
use crate::domain::entities::{Article, Tag};
use crate::domain::lifecycle::TableWriter;
use crate::domain::repository::{ArticleRepository, TagRepository};
use crate::error::BlogResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeOutput {
    pub tags: u64,
    pub articles: u64,
}

pub struct PurgeUseCase<R>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    tags: TagService<R>,
    articles: ArticleService<R>,
}

impl<R> PurgeUseCase<R>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, config: Arc<BlogConfig>) -> Self {
        Self {
            tags: TagService::new(repo.clone(), clock.clone(), config.clone()),
            articles: ArticleService::new(repo, clock, config),
        }
    }

    /// Purge both tables; a failure in one does not skip the other
    pub async fn execute(&self) -> BlogResult<PurgeOutput> {
        let tags = self.tags.purge_soft_deleted().await;
        let articles = self.articles.purge_soft_deleted().await;

        let output = PurgeOutput {
            tags: tags?,
            articles: articles?,
        };

        tracing::info!(
            tags_purged = output.tags,
            articles_purged = output.articles,
            "Soft-deleted rows purged"
        );

        Ok(output)
    }
}

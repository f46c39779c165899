//! Article Service
//!
//! Every mutation first checks that the article (and the tag it points to)
//! is live. The tag check happens here, not in the schema.

use std::sync::Arc;

use kernel::id::ArticleId;
use kernel::pagination::Page;
use platform::clock::Clock;

use crate::application::config::BlogConfig;
use crate::application::tag_service::TagService;
use crate::domain::entities::{Article, ArticleFilter, ArticlePatch, NewArticle, Scope, Tag};
use crate::domain::lifecycle::{Hooked, TableWriter};
use crate::domain::repository::{ArticleRepository, TagRepository};
use crate::error::{BlogError, BlogResult};

/// Article service
pub struct ArticleService<R>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    repo: Arc<R>,
    hooks: Hooked<R>,
    tags: TagService<R>,
    config: Arc<BlogConfig>,
}

impl<R> ArticleService<R>
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
            hooks: Hooked::new(repo.clone(), clock.clone()),
            tags: TagService::new(repo.clone(), clock, config.clone()),
            repo,
            config,
        }
    }

    pub async fn exist_by_id(&self, id: ArticleId) -> BlogResult<bool> {
        self.repo
            .exist_article_by_id(id)
            .await
            .map_err(BlogError::CheckArticleExistFail)
    }

    async fn ensure_exists(&self, id: ArticleId) -> BlogResult<()> {
        if self.exist_by_id(id).await? {
            Ok(())
        } else {
            Err(BlogError::ArticleNotExist)
        }
    }

    pub async fn get(&self, id: ArticleId) -> BlogResult<Article> {
        self.ensure_exists(id).await?;

        self.repo
            .find_article(id, Scope::Live)
            .await
            .map_err(BlogError::GetArticleFail)?
            .ok_or(BlogError::ArticleNotExist)
    }

    pub async fn list(
        &self,
        filter: &ArticleFilter,
        page: Option<i64>,
    ) -> BlogResult<Vec<Article>> {
        let page = Page::new(page, self.config.page_size);
        self.repo
            .list_articles(filter, page)
            .await
            .map_err(BlogError::GetArticlesFail)
    }

    pub async fn count(&self, filter: &ArticleFilter) -> BlogResult<i64> {
        self.repo
            .count_articles(filter)
            .await
            .map_err(BlogError::CountArticleFail)
    }

    pub async fn add(&self, fields: NewArticle) -> BlogResult<ArticleId> {
        self.tags.ensure_exists(fields.tag_id).await?;

        let id = self
            .hooks
            .create::<Article>(fields)
            .await
            .map_err(BlogError::AddArticleFail)?;

        tracing::info!(article_id = %id, "Article added");
        Ok(id)
    }

    pub async fn edit(&self, id: ArticleId, patch: ArticlePatch) -> BlogResult<()> {
        self.ensure_exists(id).await?;
        self.tags.ensure_exists(patch.tag_id).await?;

        self.hooks
            .update::<Article>(id, patch)
            .await
            .map_err(BlogError::EditArticleFail)?;

        tracing::info!(article_id = %id, "Article edited");
        Ok(())
    }

    pub async fn delete(&self, id: ArticleId) -> BlogResult<()> {
        self.ensure_exists(id).await?;

        self.hooks
            .delete::<Article>(id, Scope::Live)
            .await
            .map_err(BlogError::DeleteArticleFail)?;

        tracing::info!(article_id = %id, "Article deleted");
        Ok(())
    }

    /// Remove soft-deleted articles past the configured retention
    pub async fn purge_soft_deleted(&self) -> BlogResult<u64> {
        self.hooks
            .purge::<Article>(self.config.purge.retention_secs())
            .await
            .map_err(BlogError::PurgeFail)
    }
}

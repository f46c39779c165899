//! Tag Service
//!
//! Existence checks, pagination and lifecycle-hooked writes for tags.

use std::sync::Arc;

use kernel::id::TagId;
use kernel::pagination::Page;
use platform::clock::Clock;

use crate::application::config::BlogConfig;
use crate::domain::entities::{NewTag, Scope, Tag, TagFilter, TagPatch};
use crate::domain::lifecycle::{Hooked, TableWriter};
use crate::domain::repository::TagRepository;
use crate::error::{BlogError, BlogResult};

/// Tag service
pub struct TagService<R>
where
    R: TagRepository + TableWriter<Tag> + Send + Sync + 'static,
{
    repo: Arc<R>,
    hooks: Hooked<R>,
    config: Arc<BlogConfig>,
}

impl<R> TagService<R>
where
    R: TagRepository + TableWriter<Tag> + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, config: Arc<BlogConfig>) -> Self {
        Self {
            hooks: Hooked::new(repo.clone(), clock),
            repo,
            config,
        }
    }

    pub async fn exist_by_id(&self, id: TagId) -> BlogResult<bool> {
        self.repo
            .exist_tag_by_id(id)
            .await
            .map_err(BlogError::CheckTagExistFail)
    }

    /// Fails with `TagNotExist` unless a live tag has this id
    pub async fn ensure_exists(&self, id: TagId) -> BlogResult<()> {
        if self.exist_by_id(id).await? {
            Ok(())
        } else {
            Err(BlogError::TagNotExist)
        }
    }

    pub async fn get(&self, id: TagId) -> BlogResult<Tag> {
        self.repo
            .find_tag(id, Scope::Live)
            .await
            .map_err(BlogError::GetTagFail)?
            .ok_or(BlogError::TagNotExist)
    }

    pub async fn list(&self, filter: &TagFilter, page: Option<i64>) -> BlogResult<Vec<Tag>> {
        let page = Page::new(page, self.config.page_size);
        self.repo
            .list_tags(filter, page)
            .await
            .map_err(BlogError::GetTagsFail)
    }

    pub async fn count(&self, filter: &TagFilter) -> BlogResult<i64> {
        self.repo
            .count_tags(filter)
            .await
            .map_err(BlogError::CountTagFail)
    }

    /// Add a tag; names are unique among live tags
    pub async fn add(&self, fields: NewTag) -> BlogResult<TagId> {
        let taken = self
            .repo
            .exist_tag_by_name(&fields.name)
            .await
            .map_err(BlogError::CheckTagExistFail)?;
        if taken {
            return Err(BlogError::TagExists);
        }

        let id = self
            .hooks
            .create::<Tag>(fields)
            .await
            .map_err(BlogError::AddTagFail)?;

        tracing::info!(tag_id = %id, "Tag added");
        Ok(id)
    }

    pub async fn edit(&self, id: TagId, patch: TagPatch) -> BlogResult<()> {
        self.ensure_exists(id).await?;

        self.hooks
            .update::<Tag>(id, patch)
            .await
            .map_err(BlogError::EditTagFail)?;

        tracing::info!(tag_id = %id, "Tag edited");
        Ok(())
    }

    pub async fn delete(&self, id: TagId) -> BlogResult<()> {
        self.ensure_exists(id).await?;

        self.hooks
            .delete::<Tag>(id, Scope::Live)
            .await
            .map_err(BlogError::DeleteTagFail)?;

        tracing::info!(tag_id = %id, "Tag deleted");
        Ok(())
    }

    /// Remove soft-deleted tags past the configured retention
    pub async fn purge_soft_deleted(&self) -> BlogResult<u64> {
        self.hooks
            .purge::<Tag>(self.config.purge.retention_secs())
            .await
            .map_err(BlogError::PurgeFail)
    }
}

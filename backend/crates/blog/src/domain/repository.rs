//! Repository Traits
//!
//! Read-side interfaces. Writes go through
//! [`TableWriter`](crate::domain::lifecycle::TableWriter).

use kernel::id::{ArticleId, TagId};
use kernel::pagination::Page;

use crate::domain::entities::{Article, ArticleFilter, Scope, Tag, TagFilter};
use crate::error::StoreResult;

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    /// Whether a live tag has this id
    async fn exist_tag_by_id(&self, id: TagId) -> StoreResult<bool>;

    /// Whether a live tag has this exact name
    async fn exist_tag_by_name(&self, name: &str) -> StoreResult<bool>;

    async fn find_tag(&self, id: TagId, scope: Scope) -> StoreResult<Option<Tag>>;

    /// Live tags matching `filter`, ordered by id
    async fn list_tags(&self, filter: &TagFilter, page: Page) -> StoreResult<Vec<Tag>>;

    /// Number of live tags matching `filter`
    async fn count_tags(&self, filter: &TagFilter) -> StoreResult<i64>;
}

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    /// Whether a live article has this id
    async fn exist_article_by_id(&self, id: ArticleId) -> StoreResult<bool>;

    /// Article with its live tag attached
    async fn find_article(&self, id: ArticleId, scope: Scope) -> StoreResult<Option<Article>>;

    /// Live articles matching `filter`, ordered by id, each with its live tag
    async fn list_articles(&self, filter: &ArticleFilter, page: Page)
    -> StoreResult<Vec<Article>>;

    /// Number of live articles matching `filter`
    async fn count_articles(&self, filter: &ArticleFilter) -> StoreResult<i64>;
}

//! In-Memory Repository
//!
//! Process-local store with the same visibility rules as the PostgreSQL
//! repository. Used by tests and for running without a database. Can be
//! switched into an outage mode where every call fails with
//! `StoreError::Unavailable`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kernel::id::{ArticleId, TagId};
use kernel::pagination::Page;
use tokio::sync::RwLock;

use crate::domain::entities::{Article, ArticleFilter, Scope, Tag, TagFilter};
use crate::domain::lifecycle::{Applied, Statement, TableWriter};
use crate::domain::repository::{ArticleRepository, TagRepository};
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    tags: BTreeMap<i64, Tag>,
    /// Stored without the joined tag
    articles: BTreeMap<i64, Article>,
    last_tag_id: i64,
    last_article_id: i64,
}

impl Tables {
    fn live_tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.get(&id.get()).filter(|t| t.is_live())
    }

    fn with_tag(&self, article: &Article) -> Article {
        Article {
            tag: self.live_tag(article.tag_id).cloned(),
            ..article.clone()
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryBlogRepository {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

fn tag_matches(tag: &Tag, filter: &TagFilter) -> bool {
    tag.is_live()
        && filter.name.as_deref().is_none_or(|n| tag.name == n)
        && filter.state.is_none_or(|s| tag.state == s)
}

fn article_matches(article: &Article, filter: &ArticleFilter) -> bool {
    article.is_live()
        && filter.tag_id.is_none_or(|id| article.tag_id == id)
        && filter.state.is_none_or(|s| article.state == s)
}

fn page_bounds(page: Page) -> (usize, usize) {
    let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    (skip, take)
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for MemoryBlogRepository {
    async fn exist_tag_by_id(&self, id: TagId) -> StoreResult<bool> {
        self.check()?;
        Ok(self.tables.read().await.live_tag(id).is_some())
    }

    async fn exist_tag_by_name(&self, name: &str) -> StoreResult<bool> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.tags.values().any(|t| t.is_live() && t.name == name))
    }

    async fn find_tag(&self, id: TagId, scope: Scope) -> StoreResult<Option<Tag>> {
        self.check()?;
        let tables = self.tables.read().await;
        let tag = match scope {
            Scope::Live => tables.live_tag(id),
            Scope::Unscoped => tables.tags.get(&id.get()),
        };
        Ok(tag.cloned())
    }

    async fn list_tags(&self, filter: &TagFilter, page: Page) -> StoreResult<Vec<Tag>> {
        self.check()?;
        let (skip, take) = page_bounds(page);
        let tables = self.tables.read().await;
        Ok(tables
            .tags
            .values()
            .filter(|t| tag_matches(t, filter))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count_tags(&self, filter: &TagFilter) -> StoreResult<i64> {
        self.check()?;
        let tables = self.tables.read().await;
        let n = tables.tags.values().filter(|t| tag_matches(t, filter)).count();
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// Article Repository Implementation
// ============================================================================

impl ArticleRepository for MemoryBlogRepository {
    async fn exist_article_by_id(&self, id: ArticleId) -> StoreResult<bool> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.articles.get(&id.get()).is_some_and(Article::is_live))
    }

    async fn find_article(&self, id: ArticleId, scope: Scope) -> StoreResult<Option<Article>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .get(&id.get())
            .filter(|a| scope == Scope::Unscoped || a.is_live())
            .map(|a| tables.with_tag(a)))
    }

    async fn list_articles(
        &self,
        filter: &ArticleFilter,
        page: Page,
    ) -> StoreResult<Vec<Article>> {
        self.check()?;
        let (skip, take) = page_bounds(page);
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .values()
            .filter(|a| article_matches(a, filter))
            .skip(skip)
            .take(take)
            .map(|a| tables.with_tag(a))
            .collect())
    }

    async fn count_articles(&self, filter: &ArticleFilter) -> StoreResult<i64> {
        self.check()?;
        let tables = self.tables.read().await;
        let n = tables
            .articles
            .values()
            .filter(|a| article_matches(a, filter))
            .count();
        Ok(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// Writers
// ============================================================================

fn purge_rows<T>(
    rows: &mut BTreeMap<i64, T>,
    deleted_on: impl Fn(&T) -> i64,
    deleted_before: Option<i64>,
) -> u64 {
    let before = rows.len();
    rows.retain(|_, row| {
        let d = deleted_on(row);
        let purge = d != 0 && deleted_before.is_none_or(|cutoff| d < cutoff);
        !purge
    });
    (before - rows.len()) as u64
}

impl TableWriter<Tag> for MemoryBlogRepository {
    async fn execute(&self, statement: Statement<Tag>) -> StoreResult<Applied> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let applied = match statement {
            Statement::Insert {
                fields,
                created_on,
                modified_on,
            } => {
                tables.last_tag_id += 1;
                let id = tables.last_tag_id;
                tables.tags.insert(
                    id,
                    Tag {
                        id: TagId::new(id),
                        name: fields.name,
                        created_by: fields.created_by,
                        modified_by: String::new(),
                        state: fields.state,
                        created_on,
                        modified_on,
                        deleted_on: 0,
                    },
                );
                Applied::inserted(id)
            }
            Statement::Update {
                id,
                patch,
                modified_on,
            } => match tables.tags.get_mut(&id.get()).filter(|t| t.is_live()) {
                Some(tag) => {
                    tag.modified_on = modified_on;
                    tag.modified_by = patch.modified_by;
                    if let Some(name) = patch.name {
                        tag.name = name;
                    }
                    if let Some(state) = patch.state {
                        tag.state = state;
                    }
                    Applied::affected(1)
                }
                None => Applied::affected(0),
            },
            Statement::SoftDelete { id, deleted_on } => {
                match tables.tags.get_mut(&id.get()).filter(|t| t.is_live()) {
                    Some(tag) => {
                        tag.deleted_on = deleted_on;
                        Applied::affected(1)
                    }
                    None => Applied::affected(0),
                }
            }
            Statement::HardDelete { id } => {
                Applied::affected(u64::from(tables.tags.remove(&id.get()).is_some()))
            }
            Statement::Purge { deleted_before } => {
                Applied::affected(purge_rows(&mut tables.tags, |t| t.deleted_on, deleted_before))
            }
        };
        Ok(applied)
    }
}

impl TableWriter<Article> for MemoryBlogRepository {
    async fn execute(&self, statement: Statement<Article>) -> StoreResult<Applied> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let applied = match statement {
            Statement::Insert {
                fields,
                created_on,
                modified_on,
            } => {
                tables.last_article_id += 1;
                let id = tables.last_article_id;
                tables.articles.insert(
                    id,
                    Article {
                        id: ArticleId::new(id),
                        tag_id: fields.tag_id,
                        tag: None,
                        title: fields.title,
                        desc: fields.desc,
                        content: fields.content,
                        cover_image_url: fields.cover_image_url,
                        created_by: fields.created_by,
                        modified_by: String::new(),
                        state: fields.state,
                        created_on,
                        modified_on,
                        deleted_on: 0,
                    },
                );
                Applied::inserted(id)
            }
            Statement::Update {
                id,
                patch,
                modified_on,
            } => match tables.articles.get_mut(&id.get()).filter(|a| a.is_live()) {
                Some(article) => {
                    article.modified_on = modified_on;
                    article.modified_by = patch.modified_by;
                    article.tag_id = patch.tag_id;
                    if let Some(title) = patch.title {
                        article.title = title;
                    }
                    if let Some(desc) = patch.desc {
                        article.desc = desc;
                    }
                    if let Some(content) = patch.content {
                        article.content = content;
                    }
                    if let Some(cover) = patch.cover_image_url {
                        article.cover_image_url = cover;
                    }
                    if let Some(state) = patch.state {
                        article.state = state;
                    }
                    Applied::affected(1)
                }
                None => Applied::affected(0),
            },
            Statement::SoftDelete { id, deleted_on } => {
                match tables.articles.get_mut(&id.get()).filter(|a| a.is_live()) {
                    Some(article) => {
                        article.deleted_on = deleted_on;
                        Applied::affected(1)
                    }
                    None => Applied::affected(0),
                }
            }
            Statement::HardDelete { id } => {
                Applied::affected(u64::from(tables.articles.remove(&id.get()).is_some()))
            }
            Statement::Purge { deleted_before } => Applied::affected(purge_rows(
                &mut tables.articles,
                |a| a.deleted_on,
                deleted_before,
            )),
        };
        Ok(applied)
    }
}

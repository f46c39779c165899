//! PostgreSQL Repository Implementations

use kernel::id::{ArticleId, TagId};
use kernel::pagination::Page;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{Article, ArticleFilter, Scope, Tag, TagFilter};
use crate::domain::lifecycle::{Applied, Statement, TableWriter};
use crate::domain::repository::{ArticleRepository, TagRepository};
use crate::error::StoreResult;

const TAG_COLUMNS: &str =
    "id, name, created_by, modified_by, state, created_on, modified_on, deleted_on";

const ARTICLE_COLUMNS: &str = r#"
    a.id, a.tag_id, a.title, a."desc", a.content, a.cover_image_url,
    a.created_by, a.modified_by, a.state, a.created_on, a.modified_on, a.deleted_on,
    t.id AS t_id, t.name AS t_name, t.created_by AS t_created_by,
    t.modified_by AS t_modified_by, t.state AS t_state, t.created_on AS t_created_on,
    t.modified_on AS t_modified_on, t.deleted_on AS t_deleted_on
"#;

#[derive(Debug, Clone)]
struct Tables {
    tag: String,
    article: String,
}

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
    tables: Tables,
}

impl PgBlogRepository {
    /// `table_prefix` is prepended to `tag` and `article`
    pub fn new(pool: PgPool, table_prefix: &str) -> Self {
        Self {
            pool,
            tables: Tables {
                tag: format!("{table_prefix}{}", <Tag as crate::domain::Entity>::TABLE),
                article: format!("{table_prefix}{}", <Article as crate::domain::Entity>::TABLE),
            },
        }
    }

    fn article_select(&self) -> String {
        format!(
            "SELECT {ARTICLE_COLUMNS} FROM {} a LEFT JOIN {} t ON t.id = a.tag_id AND t.deleted_on = 0",
            self.tables.article, self.tables.tag
        )
    }
}

fn push_tag_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &TagFilter) {
    if let Some(name) = &filter.name {
        qb.push(" AND name = ").push_bind(name.clone());
    }
    if let Some(state) = filter.state {
        qb.push(" AND state = ").push_bind(state);
    }
}

fn push_article_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ArticleFilter) {
    if let Some(tag_id) = filter.tag_id {
        qb.push(" AND a.tag_id = ").push_bind(tag_id.get());
    }
    if let Some(state) = filter.state {
        qb.push(" AND a.state = ").push_bind(state);
    }
}

fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: Page) {
    qb.push(" LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgBlogRepository {
    async fn exist_tag_by_id(&self, id: TagId) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND deleted_on = 0)",
            self.tables.tag
        );
        let found = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id.get())
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn exist_tag_by_name(&self, name: &str) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE name = $1 AND deleted_on = 0)",
            self.tables.tag
        );
        let found = sqlx::query_scalar::<_, bool>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn find_tag(&self, id: TagId, scope: Scope) -> StoreResult<Option<Tag>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TAG_COLUMNS} FROM {} WHERE id = ",
            self.tables.tag
        ));
        qb.push_bind(id.get());
        if scope == Scope::Live {
            qb.push(" AND deleted_on = 0");
        }

        let row = qb
            .build_query_as::<TagRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(TagRow::into_tag))
    }

    async fn list_tags(&self, filter: &TagFilter, page: Page) -> StoreResult<Vec<Tag>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TAG_COLUMNS} FROM {} WHERE deleted_on = 0",
            self.tables.tag
        ));
        push_tag_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        push_page(&mut qb, page);

        let rows = qb.build_query_as::<TagRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn count_tags(&self, filter: &TagFilter) -> StoreResult<i64> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM {} WHERE deleted_on = 0",
            self.tables.tag
        ));
        push_tag_filter(&mut qb, filter);

        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

// ============================================================================
// Article Repository Implementation
// ============================================================================

impl ArticleRepository for PgBlogRepository {
    async fn exist_article_by_id(&self, id: ArticleId) -> StoreResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND deleted_on = 0)",
            self.tables.article
        );
        let found = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id.get())
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn find_article(&self, id: ArticleId, scope: Scope) -> StoreResult<Option<Article>> {
        let mut qb = QueryBuilder::<Postgres>::new(self.article_select());
        qb.push(" WHERE a.id = ").push_bind(id.get());
        if scope == Scope::Live {
            qb.push(" AND a.deleted_on = 0");
        }

        let row = qb
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ArticleRow::into_article))
    }

    async fn list_articles(
        &self,
        filter: &ArticleFilter,
        page: Page,
    ) -> StoreResult<Vec<Article>> {
        let mut qb = QueryBuilder::<Postgres>::new(self.article_select());
        qb.push(" WHERE a.deleted_on = 0");
        push_article_filter(&mut qb, filter);
        qb.push(" ORDER BY a.id");
        push_page(&mut qb, page);

        let rows = qb
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ArticleRow::into_article).collect())
    }

    async fn count_articles(&self, filter: &ArticleFilter) -> StoreResult<i64> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT COUNT(*) FROM {} a WHERE a.deleted_on = 0",
            self.tables.article
        ));
        push_article_filter(&mut qb, filter);

        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

// ============================================================================
// Writers
// ============================================================================

impl PgBlogRepository {
    async fn soft_delete(&self, table: &str, id: i64, deleted_on: i64) -> StoreResult<Applied> {
        let sql = format!("UPDATE {table} SET deleted_on = $1 WHERE id = $2 AND deleted_on = 0");
        let result = sqlx::query(&sql)
            .bind(deleted_on)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(Applied::affected(result.rows_affected()))
    }

    async fn hard_delete(&self, table: &str, id: i64) -> StoreResult<Applied> {
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(Applied::affected(result.rows_affected()))
    }

    async fn purge(&self, table: &str, deleted_before: Option<i64>) -> StoreResult<Applied> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("DELETE FROM {table} WHERE deleted_on != 0"));
        if let Some(cutoff) = deleted_before {
            qb.push(" AND deleted_on < ").push_bind(cutoff);
        }
        let result = qb.build().execute(&self.pool).await?;
        Ok(Applied::affected(result.rows_affected()))
    }
}

impl TableWriter<Tag> for PgBlogRepository {
    async fn execute(&self, statement: Statement<Tag>) -> StoreResult<Applied> {
        let table = self.tables.tag.as_str();
        match statement {
            Statement::Insert {
                fields,
                created_on,
                modified_on,
            } => {
                let sql = format!(
                    "INSERT INTO {table} (name, created_by, modified_by, state, created_on, modified_on, deleted_on) \
                     VALUES ($1, $2, '', $3, $4, $5, 0) RETURNING id"
                );
                let id = sqlx::query_scalar::<_, i64>(&sql)
                    .bind(fields.name)
                    .bind(fields.created_by)
                    .bind(fields.state)
                    .bind(created_on)
                    .bind(modified_on)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(Applied::inserted(id))
            }
            Statement::Update {
                id,
                patch,
                modified_on,
            } => {
                let mut qb =
                    QueryBuilder::<Postgres>::new(format!("UPDATE {table} SET modified_on = "));
                qb.push_bind(modified_on);
                qb.push(", modified_by = ").push_bind(patch.modified_by);
                if let Some(name) = patch.name {
                    qb.push(", name = ").push_bind(name);
                }
                if let Some(state) = patch.state {
                    qb.push(", state = ").push_bind(state);
                }
                qb.push(" WHERE id = ")
                    .push_bind(id.get())
                    .push(" AND deleted_on = 0");

                let result = qb.build().execute(&self.pool).await?;
                Ok(Applied::affected(result.rows_affected()))
            }
            Statement::SoftDelete { id, deleted_on } => {
                self.soft_delete(table, id.get(), deleted_on).await
            }
            Statement::HardDelete { id } => self.hard_delete(table, id.get()).await,
            Statement::Purge { deleted_before } => self.purge(table, deleted_before).await,
        }
    }
}

impl TableWriter<Article> for PgBlogRepository {
    async fn execute(&self, statement: Statement<Article>) -> StoreResult<Applied> {
        let table = self.tables.article.as_str();
        match statement {
            Statement::Insert {
                fields,
                created_on,
                modified_on,
            } => {
                let sql = format!(
                    r#"INSERT INTO {table} (tag_id, title, "desc", content, cover_image_url, created_by, modified_by, state, created_on, modified_on, deleted_on)
                       VALUES ($1, $2, $3, $4, $5, $6, '', $7, $8, $9, 0) RETURNING id"#
                );
                let id = sqlx::query_scalar::<_, i64>(&sql)
                    .bind(fields.tag_id.get())
                    .bind(fields.title)
                    .bind(fields.desc)
                    .bind(fields.content)
                    .bind(fields.cover_image_url)
                    .bind(fields.created_by)
                    .bind(fields.state)
                    .bind(created_on)
                    .bind(modified_on)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(Applied::inserted(id))
            }
            Statement::Update {
                id,
                patch,
                modified_on,
            } => {
                let mut qb =
                    QueryBuilder::<Postgres>::new(format!("UPDATE {table} SET modified_on = "));
                qb.push_bind(modified_on);
                qb.push(", modified_by = ").push_bind(patch.modified_by);
                qb.push(", tag_id = ").push_bind(patch.tag_id.get());
                if let Some(title) = patch.title {
                    qb.push(", title = ").push_bind(title);
                }
                if let Some(desc) = patch.desc {
                    qb.push(r#", "desc" = "#).push_bind(desc);
                }
                if let Some(content) = patch.content {
                    qb.push(", content = ").push_bind(content);
                }
                if let Some(cover) = patch.cover_image_url {
                    qb.push(", cover_image_url = ").push_bind(cover);
                }
                if let Some(state) = patch.state {
                    qb.push(", state = ").push_bind(state);
                }
                qb.push(" WHERE id = ")
                    .push_bind(id.get())
                    .push(" AND deleted_on = 0");

                let result = qb.build().execute(&self.pool).await?;
                Ok(Applied::affected(result.rows_affected()))
            }
            Statement::SoftDelete { id, deleted_on } => {
                self.soft_delete(table, id.get(), deleted_on).await
            }
            Statement::HardDelete { id } => self.hard_delete(table, id.get()).await,
            Statement::Purge { deleted_before } => self.purge(table, deleted_before).await,
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    created_by: String,
    modified_by: String,
    state: i64,
    created_on: i64,
    modified_on: i64,
    deleted_on: i64,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            id: TagId::new(self.id),
            name: self.name,
            created_by: self.created_by,
            modified_by: self.modified_by,
            state: self.state,
            created_on: self.created_on,
            modified_on: self.modified_on,
            deleted_on: self.deleted_on,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    tag_id: i64,
    title: String,
    desc: String,
    content: String,
    cover_image_url: String,
    created_by: String,
    modified_by: String,
    state: i64,
    created_on: i64,
    modified_on: i64,
    deleted_on: i64,
    t_id: Option<i64>,
    t_name: Option<String>,
    t_created_by: Option<String>,
    t_modified_by: Option<String>,
    t_state: Option<i64>,
    t_created_on: Option<i64>,
    t_modified_on: Option<i64>,
    t_deleted_on: Option<i64>,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        // The join only matches live tags; a NULL id means none
        let tag = self.t_id.map(|id| Tag {
            id: TagId::new(id),
            name: self.t_name.unwrap_or_default(),
            created_by: self.t_created_by.unwrap_or_default(),
            modified_by: self.t_modified_by.unwrap_or_default(),
            state: self.t_state.unwrap_or_default(),
            created_on: self.t_created_on.unwrap_or_default(),
            modified_on: self.t_modified_on.unwrap_or_default(),
            deleted_on: self.t_deleted_on.unwrap_or_default(),
        });

        Article {
            id: ArticleId::new(self.id),
            tag_id: TagId::new(self.tag_id),
            tag,
            title: self.title,
            desc: self.desc,
            content: self.content,
            cover_image_url: self.cover_image_url,
            created_by: self.created_by,
            modified_by: self.modified_by,
            state: self.state,
            created_on: self.created_on,
            modified_on: self.modified_on,
            deleted_on: self.deleted_on,
        }
    }
}

//! HTTP Handlers

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{ArticleId, TagId};
use kernel::response::{Envelope, ListData};
use platform::clock::Clock;
use platform::validation::{Validate, Violations};
use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::application::{ArticleService, TagService, UploadImageInput, UploadImageUseCase};
use crate::domain::entities::{Article, Tag};
use crate::domain::lifecycle::TableWriter;
use crate::domain::repository::{ArticleRepository, TagRepository};
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    AddArticleForm, AddTagForm, ArticleListQuery, CreatedResponse, EditArticleForm, EditTagForm,
    IdParam, TagListQuery, UploadResponse,
};
use crate::presentation::payload::Payload;

/// Shared state for blog handlers
pub struct BlogAppState<R>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BlogConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R> Clone for BlogAppState<R>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R> BlogAppState<R>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    fn tags(&self) -> TagService<R> {
        TagService::new(self.repo.clone(), self.clock.clone(), self.config.clone())
    }

    fn articles(&self) -> ArticleService<R> {
        ArticleService::new(self.repo.clone(), self.clock.clone(), self.config.clone())
    }
}

// ============================================================================
// Extraction helpers
// ============================================================================

fn path_id(path: Result<Path<i64>, PathRejection>) -> BlogResult<i64> {
    let Path(id) =
        path.map_err(|e| BlogError::InvalidParams(Violations::single("id", e.body_text())))?;
    IdParam { id }.validate()?;
    Ok(id)
}

fn query<T>(query: Result<Query<T>, QueryRejection>) -> BlogResult<T> {
    query
        .map(|Query(q)| q)
        .map_err(|e| BlogError::InvalidParams(Violations::single("query", e.body_text())))
}

// ============================================================================
// Tags
// ============================================================================

/// GET /tags?name=&state=&page=
pub async fn get_tags<R>(
    State(state): State<BlogAppState<R>>,
    q: Result<Query<TagListQuery>, QueryRejection>,
) -> BlogResult<Envelope<ListData<Tag>>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let params = query(q)?.parse()?;
    let filter = params.filter();
    let service = state.tags();

    let lists = service.list(&filter, params.page).await?;
    let total = service.count(&filter).await?;

    Ok(Envelope::success(ListData { lists, total }))
}

/// GET /tags/{id}
pub async fn get_tag<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> BlogResult<Envelope<Tag>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let id = path_id(path)?;
    let tag = state.tags().get(TagId::new(id)).await?;
    Ok(Envelope::success(tag))
}

/// POST /tags
pub async fn add_tag<R>(
    State(state): State<BlogAppState<R>>,
    Payload(form): Payload<AddTagForm>,
) -> BlogResult<Envelope<CreatedResponse>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    form.validate()?;

    let id = state.tags().add(form.into_new()).await?;
    Ok(Envelope::success(CreatedResponse { id: id.get() }))
}

/// PUT /tags/{id}
pub async fn edit_tag<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
    Payload(mut form): Payload<EditTagForm>,
) -> BlogResult<Envelope<()>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let Path(id) =
        path.map_err(|e| BlogError::InvalidParams(Violations::single("id", e.body_text())))?;
    form.id = id;
    form.validate()?;

    let (id, patch) = form.into_patch();
    state.tags().edit(id, patch).await?;
    Ok(Envelope::ok())
}

/// DELETE /tags/{id}
pub async fn delete_tag<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> BlogResult<Envelope<()>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let id = path_id(path)?;
    state.tags().delete(TagId::new(id)).await?;
    Ok(Envelope::ok())
}

// ============================================================================
// Articles
// ============================================================================

/// GET /articles?tag_id=&state=&page=
pub async fn get_articles<R>(
    State(state): State<BlogAppState<R>>,
    q: Result<Query<ArticleListQuery>, QueryRejection>,
) -> BlogResult<Envelope<ListData<Article>>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let params = query(q)?.parse()?;
    let filter = params.filter();
    let service = state.articles();

    let lists = service.list(&filter, params.page).await?;
    let total = service.count(&filter).await?;

    Ok(Envelope::success(ListData { lists, total }))
}

/// GET /articles/{id}
pub async fn get_article<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> BlogResult<Envelope<Article>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let id = path_id(path)?;
    let article = state.articles().get(ArticleId::new(id)).await?;
    Ok(Envelope::success(article))
}

/// POST /articles
pub async fn add_article<R>(
    State(state): State<BlogAppState<R>>,
    Payload(form): Payload<AddArticleForm>,
) -> BlogResult<Envelope<CreatedResponse>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    form.validate()?;

    let id = state.articles().add(form.into_new()).await?;
    Ok(Envelope::success(CreatedResponse { id: id.get() }))
}

/// PUT /articles/{id}
pub async fn edit_article<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
    Payload(mut form): Payload<EditArticleForm>,
) -> BlogResult<Envelope<()>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let Path(id) =
        path.map_err(|e| BlogError::InvalidParams(Violations::single("id", e.body_text())))?;
    form.id = id;
    form.validate()?;

    let (id, patch) = form.into_patch();
    state.articles().edit(id, patch).await?;
    Ok(Envelope::ok())
}

/// DELETE /articles/{id}
pub async fn delete_article<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> BlogResult<Envelope<()>>
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let id = path_id(path)?;
    state.articles().delete(ArticleId::new(id)).await?;
    Ok(Envelope::ok())
}

// ============================================================================
// Upload
// ============================================================================

const IMAGE_FIELD: &str = "images";

fn multipart_error(e: MultipartError) -> BlogError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        BlogError::ImageFormat
    } else {
        BlogError::Multipart(e.body_text())
    }
}

/// POST /upload (multipart field `images`)
pub async fn upload_image(
    State(config): State<Arc<BlogConfig>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> BlogResult<Envelope<UploadResponse>> {
    let mut multipart = multipart
        .map_err(|e| BlogError::InvalidParams(Violations::single(IMAGE_FIELD, e.body_text())))?;

    let mut input = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        input = Some(UploadImageInput {
            file_name,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let input = input
        .ok_or_else(|| BlogError::InvalidParams(Violations::single(IMAGE_FIELD, "can not be empty")))?;

    let output = UploadImageUseCase::new(config).execute(input).await?;
    Ok(Envelope::success(output.into()))
}

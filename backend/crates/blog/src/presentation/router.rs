//! Blog Router

use axum::extract::DefaultBodyLimit;
use axum::{Router, routing::get, routing::post};
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::domain::entities::{Article, Tag};
use crate::domain::lifecycle::TableWriter;
use crate::domain::repository::{ArticleRepository, TagRepository};
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the tag/article router with PostgreSQL repository
///
/// Mount it behind the token gate.
pub fn api_router(repo: PgBlogRepository, config: Arc<BlogConfig>) -> Router {
    api_router_generic(Arc::new(repo), config, Arc::new(SystemClock))
}

/// Create a generic tag/article router for any repository implementation
pub fn api_router_generic<R>(repo: Arc<R>, config: Arc<BlogConfig>, clock: Arc<dyn Clock>) -> Router
where
    R: ArticleRepository
        + TagRepository
        + TableWriter<Article>
        + TableWriter<Tag>
        + Send
        + Sync
        + 'static,
{
    let state = BlogAppState {
        repo,
        config,
        clock,
    };

    Router::new()
        .route("/tags", get(handlers::get_tags::<R>).post(handlers::add_tag::<R>))
        .route(
            "/tags/{id}",
            get(handlers::get_tag::<R>)
                .put(handlers::edit_tag::<R>)
                .delete(handlers::delete_tag::<R>),
        )
        .route(
            "/articles",
            get(handlers::get_articles::<R>).post(handlers::add_article::<R>),
        )
        .route(
            "/articles/{id}",
            get(handlers::get_article::<R>)
                .put(handlers::edit_article::<R>)
                .delete(handlers::delete_article::<R>),
        )
        .with_state(state)
}

/// Create the image upload router
pub fn upload_router(config: Arc<BlogConfig>) -> Router {
    let limit = config.upload_body_limit();

    Router::new()
        .route("/upload", post(handlers::upload_image))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(config)
}

//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the
//! per-crate enums rendered through `kernel::error::AppError`.

mod settings;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::{PgCredentialRepository, TokenGateState, auth_router, require_token};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use blog::{PgBlogRepository, api_router, start_purge_scheduler, upload_router};
use platform::clock::{Clock, SystemClock};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Database connection
    let pool = settings
        .pool_options()
        .connect(&settings.database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let auth_config = Arc::new(settings.auth.clone());
    let blog_config = Arc::new(settings.blog.clone());

    let image_dir = blog_config
        .image
        .ensure_dir()
        .await
        .context("image directory is not usable")?;

    // Purge job shares the request pool
    let scheduler = start_purge_scheduler(
        Arc::new(PgBlogRepository::new(pool.clone(), &settings.table_prefix)),
        clock.clone(),
        blog_config.clone(),
    )
    .await
    .context("failed to start purge scheduler")?;

    // CORS configuration
    let allowed_origins: Vec<HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("token"),
        ]));

    let gate = TokenGateState {
        config: auth_config.clone(),
        clock,
    };

    let api = api_router(
        PgBlogRepository::new(pool.clone(), &settings.table_prefix),
        blog_config.clone(),
    )
    .layer(middleware::from_fn_with_state(gate, require_token));

    // Build router
    let app = Router::new()
        .merge(auth_router(
            PgCredentialRepository::new(pool.clone(), &settings.table_prefix),
            auth_config,
        ))
        .merge(upload_router(blog_config.clone()))
        .nest_service(
            &format!("/{}", blog_config.image.save_path.trim_matches('/')),
            ServeDir::new(image_dir),
        )
        .nest("/api/v1", api)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            settings.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, releasing resources");

    if let Some(mut scheduler) = scheduler {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Purge scheduler did not shut down cleanly");
        }
    }
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

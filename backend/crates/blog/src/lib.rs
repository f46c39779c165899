//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, storage lifecycle hooks, repository traits
//! - `application/` - Tag/article services, image upload, purge
//! - `infra/` - PostgreSQL and in-memory stores, purge scheduler
//! - `presentation/` - HTTP handlers, forms, router
//!
//! ## Storage Model
//! - Every write goes through [`domain::lifecycle::Hooked`], which stamps
//!   `created_on`/`modified_on` and turns deletes into soft deletes
//! - Reads only see live rows (`deleted_on = 0`) unless asked otherwise
//! - Article → tag references are checked by the service, not by the schema

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{BlogConfig, PurgeConfig};
pub use error::{BlogError, BlogResult, StoreError, StoreResult};
pub use infra::postgres::PgBlogRepository;
pub use infra::scheduler::start_purge_scheduler;
pub use presentation::router::{api_router, api_router_generic, upload_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

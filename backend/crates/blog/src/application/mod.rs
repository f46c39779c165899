//! Application Layer
//!
//! Use cases and application services.

pub mod article_service;
pub mod config;
pub mod purge;
pub mod tag_service;
pub mod upload_image;

// Re-exports
pub use article_service::ArticleService;
pub use config::{BlogConfig, PurgeConfig};
pub use purge::{PurgeOutput, PurgeUseCase};
pub use tag_service::TagService;
pub use upload_image::{UploadImageInput, UploadImageOutput, UploadImageUseCase};

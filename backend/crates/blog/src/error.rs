//! Blog Error Types
//!
//! `StoreError` is what storage returns; `BlogError` is what services
//! return, one variant per response code, integrating with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, code::Code, kind::ErrorKind};
use platform::validation::Violations;
use thiserror::Error;

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store cannot be reached
    #[error("Storage unavailable")]
    Unavailable,

    /// Insert did not report the new row id
    #[error("Insert returned no id")]
    MissingId,
}

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Request fields failed validation
    #[error("Invalid parameters: {0}")]
    InvalidParams(Violations),

    // ------------------------------------------------------------------
    // Expected outcomes
    // ------------------------------------------------------------------
    #[error("Tag name already exists")]
    TagExists,

    #[error("Tag does not exist")]
    TagNotExist,

    #[error("Article does not exist")]
    ArticleNotExist,

    // ------------------------------------------------------------------
    // Storage failures, per operation
    // ------------------------------------------------------------------
    #[error("Failed to check tag existence: {0}")]
    CheckTagExistFail(#[source] StoreError),

    #[error("Failed to get tag: {0}")]
    GetTagFail(#[source] StoreError),

    #[error("Failed to list tags: {0}")]
    GetTagsFail(#[source] StoreError),

    #[error("Failed to count tags: {0}")]
    CountTagFail(#[source] StoreError),

    #[error("Failed to add tag: {0}")]
    AddTagFail(#[source] StoreError),

    #[error("Failed to edit tag: {0}")]
    EditTagFail(#[source] StoreError),

    #[error("Failed to delete tag: {0}")]
    DeleteTagFail(#[source] StoreError),

    #[error("Failed to check article existence: {0}")]
    CheckArticleExistFail(#[source] StoreError),

    #[error("Failed to get article: {0}")]
    GetArticleFail(#[source] StoreError),

    #[error("Failed to list articles: {0}")]
    GetArticlesFail(#[source] StoreError),

    #[error("Failed to count articles: {0}")]
    CountArticleFail(#[source] StoreError),

    #[error("Failed to add article: {0}")]
    AddArticleFail(#[source] StoreError),

    #[error("Failed to edit article: {0}")]
    EditArticleFail(#[source] StoreError),

    #[error("Failed to delete article: {0}")]
    DeleteArticleFail(#[source] StoreError),

    #[error("Failed to purge soft-deleted rows: {0}")]
    PurgeFail(#[source] StoreError),

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------
    /// Extension not allowed or file too large
    #[error("Invalid image format or size")]
    ImageFormat,

    /// Image directory missing or not writable
    #[error("Image directory check failed: {0}")]
    ImageCheckFail(#[source] std::io::Error),

    #[error("Failed to save image: {0}")]
    ImageSaveFail(#[source] std::io::Error),

    /// Broken multipart stream
    #[error("Multipart error: {0}")]
    Multipart(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::InvalidParams(_) | BlogError::ImageFormat => ErrorKind::InvalidParams,
            BlogError::TagExists | BlogError::TagNotExist | BlogError::ArticleNotExist => {
                ErrorKind::BusinessRule
            }
            _ => ErrorKind::Internal,
        }
    }

    /// Response code carried in the envelope
    pub fn code(&self) -> Code {
        match self {
            BlogError::InvalidParams(_) => Code::InvalidParams,
            BlogError::TagExists => Code::ExistTag,
            BlogError::TagNotExist => Code::NotExistTag,
            BlogError::ArticleNotExist => Code::NotExistArticle,
            BlogError::CheckTagExistFail(_) => Code::ExistTagFail,
            BlogError::GetTagFail(_) => Code::GetTagFail,
            BlogError::GetTagsFail(_) => Code::GetTagsFail,
            BlogError::CountTagFail(_) => Code::CountTagFail,
            BlogError::AddTagFail(_) => Code::AddTagFail,
            BlogError::EditTagFail(_) => Code::EditTagFail,
            BlogError::DeleteTagFail(_) => Code::DeleteTagFail,
            BlogError::CheckArticleExistFail(_) => Code::CheckExistArticleFail,
            BlogError::GetArticleFail(_) => Code::GetArticleFail,
            BlogError::GetArticlesFail(_) => Code::GetArticlesFail,
            BlogError::CountArticleFail(_) => Code::CountArticleFail,
            BlogError::AddArticleFail(_) => Code::AddArticleFail,
            BlogError::EditArticleFail(_) => Code::EditArticleFail,
            BlogError::DeleteArticleFail(_) => Code::DeleteArticleFail,
            BlogError::PurgeFail(_) | BlogError::Multipart(_) => Code::Error,
            BlogError::ImageFormat => Code::UploadCheckImageFormat,
            BlogError::ImageCheckFail(_) => Code::UploadCheckImageFail,
            BlogError::ImageSaveFail(_) => Code::UploadSaveImageFail,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.code()).with_detail(self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::InvalidParams(v) => v.log(),
            BlogError::TagExists | BlogError::TagNotExist | BlogError::ArticleNotExist => {
                tracing::debug!(error = %self, "Blog request rejected");
            }
            BlogError::ImageFormat => {
                tracing::info!("Rejected image upload");
            }
            _ => {
                tracing::error!(error = %self, code = self.code().as_i32(), "Blog storage error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<Violations> for BlogError {
    fn from(v: Violations) -> Self {
        BlogError::InvalidParams(v)
    }
}

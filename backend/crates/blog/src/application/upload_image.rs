//! Upload Image Use Case
//!
//! Checks an uploaded image against the configured policy and writes it
//! under the runtime directory.

use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::error::{BlogError, BlogResult};

pub struct UploadImageInput {
    /// Client-supplied file name
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImageOutput {
    /// Public URL of the stored image
    pub image_url: String,
    /// Path relative to the runtime root
    pub image_save_url: String,
}

pub struct UploadImageUseCase {
    config: Arc<BlogConfig>,
}

impl UploadImageUseCase {
    pub fn new(config: Arc<BlogConfig>) -> Self {
        Self { config }
    }

    pub async fn execute(&self, input: UploadImageInput) -> BlogResult<UploadImageOutput> {
        let policy = &self.config.image;
        let name = policy.image_name(&input.file_name);

        if !policy.check_ext(&name) || !policy.check_size(input.bytes.len()) {
            return Err(BlogError::ImageFormat);
        }

        let dir = policy
            .ensure_dir()
            .await
            .map_err(BlogError::ImageCheckFail)?;

        tokio::fs::write(dir.join(&name), &input.bytes)
            .await
            .map_err(BlogError::ImageSaveFail)?;

        tracing::info!(file = %name, size = input.bytes.len(), "Image saved");

        Ok(UploadImageOutput {
            image_url: policy.image_url(&name),
            image_save_url: policy.save_url(&name),
        })
    }
}

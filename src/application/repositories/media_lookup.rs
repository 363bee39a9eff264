use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::media::MediaEntry};

/// Access to the media files stored with each page.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    /// Storage directory of a page route.
    fn page_dir(&self, page: &str) -> Result<PathBuf, ApplicationError>;
    /// Absolute path of `filename` inside the page's storage directory.
    fn media_path(&self, page: &str, filename: &str) -> Result<PathBuf, ApplicationError>;
    async fn media_exists(&self, path: &Path) -> Result<bool, ApplicationError>;
    /// Media of a page ordered by filename, each with its stored metadata.
    async fn list_media(&self, page: &str) -> Result<Vec<MediaEntry>, ApplicationError>;
    async fn save_media(
        &self,
        page: &str,
        filename: &str,
        content: &[u8],
    ) -> Result<PathBuf, ApplicationError>;
}

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::{
    application::{error::ApplicationError, repositories::media_lookup::MediaLookup},
    domain::models::{
        media::{is_media_name, MediaEntry},
        metadata::{sidecar_path, MetadataRecord},
    },
    services::{SidecarError, YamlSidecarStore},
};

/// Media lookup over a directory tree of pages, one directory per route.
pub struct FsMediaLookup {
    pages_root: PathBuf,
    sidecars: YamlSidecarStore,
}

impl FsMediaLookup {
    pub fn new(pages_root: impl Into<PathBuf>) -> Self {
        Self {
            pages_root: pages_root.into(),
            sidecars: YamlSidecarStore::new(),
        }
    }

    async fn stored_metadata(&self, media_path: &Path) -> MetadataRecord {
        let sidecar = sidecar_path(media_path);
        match self.sidecars.read(&sidecar).await {
            Ok(record) => record,
            Err(SidecarError::NotFound(_)) => MetadataRecord::new(),
            Err(e) => {
                warn!("Ignoring unreadable sidecar: {}", e);
                MetadataRecord::new()
            }
        }
    }
}

#[async_trait]
impl MediaLookup for FsMediaLookup {
    fn page_dir(&self, page: &str) -> Result<PathBuf, ApplicationError> {
        let route = page.trim().trim_matches('/');
        if route.is_empty() {
            return Err(ApplicationError::BadRequest("Missing page route".to_string()));
        }

        let mut dir = self.pages_root.clone();
        for segment in route.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(ApplicationError::BadRequest(format!(
                    "Invalid page route: {}",
                    page
                )));
            }
            dir.push(segment);
        }

        Ok(dir)
    }

    fn media_path(&self, page: &str, filename: &str) -> Result<PathBuf, ApplicationError> {
        Ok(self.page_dir(page)?.join(filename))
    }

    async fn media_exists(&self, path: &Path) -> Result<bool, ApplicationError> {
        match fs::metadata(path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ApplicationError::InternalError(format!(
                "Cannot stat {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn list_media(&self, page: &str) -> Result<Vec<MediaEntry>, ApplicationError> {
        let dir = self.page_dir(page)?;
        let mut entries = fs::read_dir(&dir).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::BadRequest(format!("Page not found: {}", page)),
            _ => ApplicationError::InternalError(format!("Cannot read {}: {}", dir.display(), e)),
        })?;

        let mut media = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ApplicationError::InternalError(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            let Some(filename) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            if !is_file || !is_media_name(&filename) {
                continue;
            }

            let path = entry.path();
            let metadata = self.stored_metadata(&path).await;
            media.push(MediaEntry {
                filename,
                path,
                metadata,
            });
        }

        media.sort_by(|a, b| a.filename.cmp(&b.filename));
        debug!("Listed {} media file(s) for page {}", media.len(), page);
        Ok(media)
    }

    async fn save_media(
        &self,
        page: &str,
        filename: &str,
        content: &[u8],
    ) -> Result<PathBuf, ApplicationError> {
        if !is_media_name(filename) {
            return Err(ApplicationError::InvalidFilename(filename.to_string()));
        }

        let dir = self.page_dir(page)?;
        fs::create_dir_all(&dir).await.map_err(|e| {
            ApplicationError::InternalError(format!("Cannot create {}: {}", dir.display(), e))
        })?;

        let path = dir.join(filename);
        fs::write(&path, content).await.map_err(|e| {
            ApplicationError::InternalError(format!("Cannot write {}: {}", path.display(), e))
        })?;

        info!("Stored media {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }
}

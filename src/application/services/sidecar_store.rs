use std::path::Path;

use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::models::metadata::MetadataRecord};

/// Persistence of metadata records, addressed by sidecar path.
#[async_trait]
pub trait SidecarStore: Send + Sync {
    async fn exists(&self, sidecar: &Path) -> Result<bool, ApplicationError>;
    async fn load(&self, sidecar: &Path) -> Result<MetadataRecord, ApplicationError>;
    async fn save(&self, sidecar: &Path, record: &MetadataRecord) -> Result<(), ApplicationError>;
}

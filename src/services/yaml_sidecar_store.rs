use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::SidecarError;
use crate::{
    application::{error::ApplicationError, services::SidecarStore},
    domain::models::metadata::MetadataRecord,
};

/// Stores metadata records as YAML documents on the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct YamlSidecarStore;

impl YamlSidecarStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn read(&self, sidecar: &Path) -> Result<MetadataRecord, SidecarError> {
        let content = fs::read_to_string(sidecar)
            .await
            .map_err(|e| SidecarError::io(sidecar, e))?;

        MetadataRecord::from_yaml(&content).map_err(|source| SidecarError::Malformed {
            path: sidecar.to_path_buf(),
            source,
        })
    }

    pub async fn write(&self, sidecar: &Path, record: &MetadataRecord) -> Result<(), SidecarError> {
        let content = record.to_yaml().map_err(|source| SidecarError::Malformed {
            path: sidecar.to_path_buf(),
            source,
        })?;

        // Readers see either the previous record or the new one, never a
        // partial document.
        let staging = staging_path(sidecar);
        if let Err(e) = fs::write(&staging, content).await {
            let _ = fs::remove_file(&staging).await;
            return Err(SidecarError::io(sidecar, e));
        }
        if let Err(e) = fs::rename(&staging, sidecar).await {
            let _ = fs::remove_file(&staging).await;
            return Err(SidecarError::io(sidecar, e));
        }

        debug!("Wrote sidecar {}", sidecar.display());
        Ok(())
    }
}

/// Hidden sibling of `sidecar` used to stage a write before renaming it over.
fn staging_path(sidecar: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(sidecar.file_name().unwrap_or_default());
    name.push(".tmp");
    sidecar.with_file_name(name)
}

#[async_trait]
impl SidecarStore for YamlSidecarStore {
    async fn exists(&self, sidecar: &Path) -> Result<bool, ApplicationError> {
        fs::try_exists(sidecar)
            .await
            .map_err(|e| SidecarError::io(sidecar, e).into())
    }

    async fn load(&self, sidecar: &Path) -> Result<MetadataRecord, ApplicationError> {
        Ok(self.read(sidecar).await?)
    }

    async fn save(&self, sidecar: &Path, record: &MetadataRecord) -> Result<(), ApplicationError> {
        Ok(self.write(sidecar, record).await?)
    }
}

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{application::error::ApplicationError, domain::models::metadata::RecordFormatError};

#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("Metadata file not found: {0}")]
    NotFound(PathBuf),

    #[error("Malformed metadata file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: RecordFormatError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SidecarError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            SidecarError::NotFound(path)
        } else {
            SidecarError::Io { path, source }
        }
    }
}

impl From<SidecarError> for ApplicationError {
    fn from(error: SidecarError) -> Self {
        match error {
            SidecarError::NotFound(path) => {
                ApplicationError::SidecarNotFound(path.display().to_string())
            }
            SidecarError::Malformed { .. } => ApplicationError::MalformedSidecar(error.to_string()),
            SidecarError::Io { .. } => ApplicationError::InternalError(error.to_string()),
        }
    }
}

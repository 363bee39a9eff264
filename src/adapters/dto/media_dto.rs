use serde::{Deserialize, Serialize};

use crate::application::error::ApplicationError;

/// `?page=<route>` on every admin metadata route.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn route(&self) -> Result<&str, ApplicationError> {
        self.page
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApplicationError::BadRequest("Missing page route".to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct MediaUploadedRequest {
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadMediaResponse {
    pub filename: String,
    #[serde(rename = "metadataCreated")]
    pub metadata_created: bool,
}

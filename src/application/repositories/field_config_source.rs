use async_trait::async_trait;

use crate::{application::error::ApplicationError, domain::config::form::MetadataForm};

#[async_trait]
pub trait FieldConfigSource: Send + Sync {
    /// Form configuration in effect for a page.
    async fn metadata_form(&self, page: &str) -> Result<MetadataForm, ApplicationError>;
}

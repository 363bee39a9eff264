use crate::{application::error::ApplicationError, domain::config::form::MetadataForm};

pub trait TemplateRenderer: Send + Sync {
    /// Markup of the edit dialog for a form configuration.
    fn render_modal(&self, form: &MetadataForm) -> Result<String, ApplicationError>;
}

use std::{io, path::Path, sync::Arc};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::{
    application::{
        error::ApplicationError,
        repositories::{field_config_source::FieldConfigSource, media_lookup::MediaLookup},
    },
    domain::config::form::{MetadataForm, PluginConfig, PAGE_FORM_FILE},
};

/// Form configuration from the plugin YAML file, overridable per page.
pub struct YamlFieldConfigSource {
    default_form: MetadataForm,
    media_lookup: Arc<dyn MediaLookup>,
}

impl YamlFieldConfigSource {
    pub fn new(default_form: MetadataForm, media_lookup: Arc<dyn MediaLookup>) -> Self {
        Self {
            default_form,
            media_lookup,
        }
    }

    /// Reads and validates the plugin configuration file.
    pub async fn load_plugin_config(path: &Path) -> Result<PluginConfig, ApplicationError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ApplicationError::InvalidConfiguration(format!(
                "Cannot read {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = PluginConfig::from_yaml(&content).map_err(|e| {
            ApplicationError::InvalidConfiguration(format!("{}: {}", path.display(), e))
        })?;
        info!(
            "Loaded {} metadata field(s) from {}",
            config.metadata_form.fields.len(),
            path.display()
        );
        Ok(config)
    }
}

#[async_trait]
impl FieldConfigSource for YamlFieldConfigSource {
    async fn metadata_form(&self, page: &str) -> Result<MetadataForm, ApplicationError> {
        let override_path = self.media_lookup.page_dir(page)?.join(PAGE_FORM_FILE);

        match fs::read_to_string(&override_path).await {
            Ok(content) => {
                let config = PluginConfig::from_yaml(&content).map_err(|e| {
                    ApplicationError::InvalidConfiguration(format!(
                        "{}: {}",
                        override_path.display(),
                        e
                    ))
                })?;
                debug!("Using page form override {}", override_path.display());
                Ok(config.metadata_form)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.default_form.clone()),
            Err(e) => Err(ApplicationError::InternalError(format!(
                "Cannot read {}: {}",
                override_path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::repositories::FsMediaLookup, domain::models::field::FieldDescriptor,
    };

    fn source(root: &Path) -> YamlFieldConfigSource {
        YamlFieldConfigSource::new(
            MetadataForm::new(vec![
                FieldDescriptor::new("alt", "text"),
                FieldDescriptor::new("caption", "text"),
            ]),
            Arc::new(FsMediaLookup::new(root)),
        )
    }

    #[tokio::test]
    async fn falls_back_to_plugin_form() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("blog")).unwrap();

        let form = source(root.path()).metadata_form("blog").await.unwrap();
        assert_eq!(form.fields.len(), 2);
    }

    #[tokio::test]
    async fn page_override_replaces_plugin_form() {
        let root = tempfile::tempdir().unwrap();
        let page = root.path().join("gallery");
        std::fs::create_dir_all(&page).unwrap();
        std::fs::write(
            page.join(PAGE_FORM_FILE),
            "metadata_form:\n  fields:\n    - {name: credit, type: text}\n",
        )
        .unwrap();

        let form = source(root.path()).metadata_form("gallery").await.unwrap();
        let names: Vec<_> = form.editable_fields().names().map(String::from).collect();
        assert_eq!(names, vec!["credit"]);
    }

    #[tokio::test]
    async fn invalid_override_is_a_configuration_error() {
        let root = tempfile::tempdir().unwrap();
        let page = root.path().join("gallery");
        std::fs::create_dir_all(&page).unwrap();
        std::fs::write(
            page.join(PAGE_FORM_FILE),
            "metadata_form:\n  fields:\n    - {name: credit}\n",
        )
        .unwrap();

        assert!(matches!(
            source(root.path()).metadata_form("gallery").await,
            Err(ApplicationError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn loads_plugin_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin-addon-media-metadata.yaml");
        std::fs::write(
            &path,
            "enabled: true\nmetadata_form:\n  fields:\n    - {name: alt, type: text}\n",
        )
        .unwrap();

        let config = YamlFieldConfigSource::load_plugin_config(&path).await.unwrap();
        assert_eq!(config.metadata_form.fields[0].name, "alt");

        assert!(matches!(
            YamlFieldConfigSource::load_plugin_config(&dir.path().join("missing.yaml")).await,
            Err(ApplicationError::InvalidConfiguration(_))
        ));
    }
}

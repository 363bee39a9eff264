use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

use crate::domain::models::field::{editable_field_names, EditableFields, FieldDescriptor};

/// File in a page directory whose `metadata_form` replaces the plugin-wide one.
pub const PAGE_FORM_FILE: &str = "media-metadata.yaml";

#[derive(Debug, Error, PartialEq)]
pub enum FormConfigError {
    #[error("invalid YAML: {0}")]
    Yaml(String),

    #[error("missing `metadata_form` section")]
    MissingForm,

    #[error("field #{index} has no name")]
    MissingName { index: usize },

    #[error("field `{name}` has no type")]
    MissingType { name: String },

    #[error("field `{name}` is declared more than once")]
    DuplicateField { name: String },
}

/// Descriptor as written in YAML, before validation.
#[derive(Debug, Deserialize)]
struct RawFieldDescriptor {
    name: Option<String>,
    #[serde(rename = "type")]
    field_type: Option<String>,
    label: Option<String>,
    #[serde(flatten)]
    options: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawMetadataForm {
    #[serde(default)]
    fields: Vec<RawFieldDescriptor>,
    #[serde(flatten)]
    presentation: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawPluginConfig {
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    metadata_form: Option<RawMetadataForm>,
}

fn enabled_by_default() -> bool {
    true
}

/// The `metadata_form` section: the ordered field list plus presentation keys.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetadataForm {
    pub fields: Vec<FieldDescriptor>,
    #[serde(flatten)]
    pub presentation: BTreeMap<String, Value>,
}

impl MetadataForm {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields,
            presentation: BTreeMap::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.presentation.get("title").and_then(Value::as_str)
    }

    pub fn editable_fields(&self) -> EditableFields {
        editable_field_names(&self.fields)
    }

    fn from_raw(raw: RawMetadataForm) -> Result<Self, FormConfigError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(raw.fields.len());

        for (index, entry) in raw.fields.into_iter().enumerate() {
            let name = entry
                .name
                .filter(|n| !n.trim().is_empty())
                .ok_or(FormConfigError::MissingName { index })?;
            let field_type = entry
                .field_type
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| FormConfigError::MissingType { name: name.clone() })?;

            if !seen.insert(name.clone()) {
                return Err(FormConfigError::DuplicateField { name });
            }

            fields.push(FieldDescriptor {
                name,
                field_type,
                label: entry.label,
                options: entry.options,
            });
        }

        Ok(Self {
            fields,
            presentation: raw.presentation,
        })
    }
}

/// Plugin configuration file contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub enabled: bool,
    pub metadata_form: MetadataForm,
}

impl PluginConfig {
    /// Parses and validates a plugin configuration document.
    pub fn from_yaml(content: &str) -> Result<Self, FormConfigError> {
        let raw: RawPluginConfig =
            serde_yaml::from_str(content).map_err(|e| FormConfigError::Yaml(e.to_string()))?;
        let form = raw.metadata_form.ok_or(FormConfigError::MissingForm)?;

        Ok(Self {
            enabled: raw.enabled,
            metadata_form: MetadataForm::from_raw(form)?,
        })
    }
}

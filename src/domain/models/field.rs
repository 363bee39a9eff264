use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name that is always shown read-only and never written by an edit.
pub const RESERVED_FIELD: &str = "filename";

/// A metadata field declared in the form configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            label: None,
            options: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_reserved(&self) -> bool {
        self.name == RESERVED_FIELD
    }
}

/// Ordered set of descriptors whose values may be edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditableFields {
    fields: Vec<FieldDescriptor>,
}

impl EditableFields {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Filters a descriptor list down to the fields an editor may change.
///
/// `filename` is dropped, as is any descriptor with an empty name or type.
/// Input order is kept and the first descriptor wins when a name repeats.
pub fn editable_field_names(descriptors: &[FieldDescriptor]) -> EditableFields {
    let mut fields: Vec<FieldDescriptor> = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if descriptor.name.trim().is_empty() || descriptor.field_type.trim().is_empty() {
            continue;
        }
        if descriptor.is_reserved() {
            continue;
        }
        if fields.iter().any(|f| f.name == descriptor.name) {
            continue;
        }
        fields.push(descriptor.clone());
    }

    EditableFields { fields }
}

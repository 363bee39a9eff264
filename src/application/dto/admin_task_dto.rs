use std::collections::HashMap;

/// Task name the metadata modal posts with.
pub const TASK_METADATA: &str = "AdminAddonMediaMetadataEdit";

/// An admin task submission as received by the shared task hook.
#[derive(Debug, Clone, Default)]
pub struct AdminTaskDTO {
    /// `"task"` followed by the posted task name.
    pub method: String,
    pub filename: Option<String>,
    /// Every other posted field, keyed by its form name.
    pub values: HashMap<String, String>,
}

impl AdminTaskDTO {
    pub fn from_form(mut form: HashMap<String, String>) -> Self {
        let task = form.remove("task").unwrap_or_default();
        let filename = form.remove("filename");

        Self {
            method: format!("task{}", task.trim()),
            filename,
            values: form,
        }
    }

    pub fn is_metadata_edit(&self) -> bool {
        self.method == format!("task{}", TASK_METADATA)
    }
}

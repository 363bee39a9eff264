use serde::Serialize;
use serde_json::{Map, Value};

use crate::application::services::MediaListing;

/// Settings the admin script needs to open and submit the dialog.
#[derive(Debug, Serialize)]
pub struct ClientConfig {
    #[serde(rename = "PATH")]
    pub path: String,
    #[serde(rename = "MODAL")]
    pub modal: String,
}

#[derive(Debug, Serialize)]
pub struct BootstrapResponse {
    #[serde(rename = "metadataFormFields")]
    pub metadata_form_fields: Vec<String>,
    #[serde(rename = "mediaListOnLoad")]
    pub media_list_on_load: Map<String, Value>,
    #[serde(rename = "adminAddonMediaMetadata")]
    pub admin_addon_media_metadata: ClientConfig,
}

impl BootstrapResponse {
    pub fn new(listing: &MediaListing, path: String, modal: String) -> Self {
        let metadata_form_fields: Vec<String> =
            listing.editable.names().map(String::from).collect();

        let mut media_list_on_load = Map::new();
        for entry in &listing.media {
            let mut item = Map::new();
            item.insert("filename".to_string(), Value::from(entry.filename.clone()));
            for key in &metadata_form_fields {
                let value = entry
                    .metadata
                    .get(key)
                    .and_then(|v| serde_json::to_value(v).ok())
                    .unwrap_or(Value::Null);
                item.insert(key.clone(), value);
            }
            media_list_on_load.insert(entry.filename.clone(), Value::Object(item));
        }

        Self {
            metadata_form_fields,
            media_list_on_load,
            admin_addon_media_metadata: ClientConfig { path, modal },
        }
    }

    /// The payload as script variable declarations for inline embedding.
    pub fn to_inline_js(&self) -> Result<String, serde_json::Error> {
        let fields = script_safe(serde_json::to_string(&self.metadata_form_fields)?);
        let media = script_safe(serde_json::to_string(&self.media_list_on_load)?);
        let config = script_safe(serde_json::to_string(&self.admin_addon_media_metadata)?);

        Ok(format!(
            "var metadataFormFields = {};\nvar mediaListOnLoad = {};\nvar adminAddonMediaMetadata = {};",
            fields, media, config
        ))
    }
}

// JSON is valid JS, but a literal `</` inside a string would close the script tag.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

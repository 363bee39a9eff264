use std::path::PathBuf;

use super::metadata::{is_sidecar_name, sanitize_value, MetadataRecord};
use crate::domain::config::form::PAGE_FORM_FILE;

/// A media file of a page together with its stored metadata.
#[derive(Debug, Clone)]
pub struct MediaEntry {
    pub filename: String,
    pub path: PathBuf,
    pub metadata: MetadataRecord,
}

/// Sanitizes a posted media filename and checks it names a single file.
///
/// Returns `None` when nothing usable is left or the name would leave the
/// page directory.
pub fn clean_filename(raw: &str) -> Option<String> {
    let name = sanitize_value(raw).trim().to_string();

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    if name.contains(['/', '\\', '\n', '\r', '\t']) {
        return None;
    }

    Some(name)
}

/// Whether a page file counts as media rather than page data.
///
/// Hidden files, metadata sidecars, page markdown and the page form override
/// are not media and must never be written through the media endpoints.
pub fn is_media_name(filename: &str) -> bool {
    !(filename.starts_with('.')
        || is_sidecar_name(filename)
        || filename.ends_with(".md")
        || filename == PAGE_FORM_FILE)
}

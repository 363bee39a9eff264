use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Suffix appended to a media file name to get its metadata sidecar.
pub const SIDECAR_SUFFIX: &str = ".meta.yaml";

#[derive(Debug, Error)]
pub enum RecordFormatError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document root is not a mapping")]
    NotAMapping,
}

/// Key/value metadata stored next to a media file.
///
/// Backed by an ordered YAML mapping so keys this service never writes
/// (including non-string values added by hand) survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    entries: Mapping,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding every given key with an empty string value.
    pub fn empty_for<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut record = Self::new();
        for key in keys {
            record.set(key, String::new());
        }
        record
    }

    pub fn from_yaml(content: &str) -> Result<Self, RecordFormatError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        match serde_yaml::from_str::<Value>(content)? {
            Value::Null => Ok(Self::new()),
            Value::Mapping(entries) => Ok(Self { entries }),
            _ => Err(RecordFormatError::NotAMapping),
        }
    }

    pub fn to_yaml(&self) -> Result<String, RecordFormatError> {
        Ok(serde_yaml::to_string(&self.entries)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.entries
            .insert(Value::String(key.to_string()), Value::String(value));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.entries
    }
}

pub fn sidecar_path(media_path: &Path) -> PathBuf {
    let mut name = media_path.as_os_str().to_os_string();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

pub fn is_sidecar_name(filename: &str) -> bool {
    filename.ends_with(SIDECAR_SUFFIX)
}

/// Strips markup tags and control characters from user-supplied text.
///
/// A `<` only opens a tag when followed by a letter, `/`, `!` or `?` and
/// closed by a later `>`; any other `<` is kept as text. Newlines and tabs
/// are kept; quoting is left to the YAML serializer.
pub fn sanitize_value(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '<' && opens_tag(chars.get(i + 1).copied()) {
            if let Some(close) = chars[i + 1..].iter().position(|&ch| ch == '>') {
                i += close + 2;
                continue;
            }
        }
        match c {
            '\n' | '\r' | '\t' => out.push(c),
            _ if c.is_control() => {}
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

fn opens_tag(next: Option<char>) -> bool {
    matches!(next, Some(ch) if ch.is_alphabetic() || matches!(ch, '/' | '!' | '?'))
}

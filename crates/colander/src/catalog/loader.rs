//! Catalog document loading.
//!
//! Two document shapes load transparently: a bare JSON array of records,
//! or an object carrying the reserved settings key alongside the records
//! (either under a `"data"` array or as a map of record-like values). A
//! rejected load leaves no partial state behind; callers only see the
//! parsed document or an error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{ColanderError, Result};
use crate::rules::SettingsDiff;
use super::record::{Record, DATA_KEY, NAME_FIELD, SETTINGS_KEY};

/// Which of the supported document shapes a load produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentShape {
    /// Bare ordered array of records.
    Array,
    /// Settings-wrapped object with a record array under `"data"`.
    Wrapped,
    /// Settings-wrapped object whose remaining values are the records.
    Keyed,
}

impl std::fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentShape::Array => write!(f, "array"),
            DocumentShape::Wrapped => write!(f, "wrapped"),
            DocumentShape::Keyed => write!(f, "keyed"),
        }
    }
}

/// Metadata about a loaded catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected document shape.
    pub shape: DocumentShape,
    /// Number of records loaded.
    pub record_count: usize,
    /// When the load was performed.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        shape: DocumentShape,
        record_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            shape,
            record_count,
            loaded_at: Utc::now(),
        }
    }
}

/// A successfully parsed input document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The records, in document order.
    pub records: Vec<Record>,
    /// Settings diff carried by a wrapped document.
    pub settings: Option<SettingsDiff>,
    /// Shape the document arrived in.
    pub shape: DocumentShape,
}

/// Load and parse a catalog file, returning the document and its metadata.
pub fn load_file(path: impl AsRef<Path>) -> Result<(LoadedDocument, SourceMetadata)> {
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|e| ColanderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut contents = Vec::new();
    file.read_to_end(&mut contents).map_err(|e| ColanderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let hash = format!("sha256:{:x}", hasher.finalize());

    let value: Value = serde_json::from_slice(&contents)?;
    let document = parse_document(value)?;

    let metadata = SourceMetadata::new(
        path.to_path_buf(),
        hash,
        contents.len() as u64,
        document.shape,
        document.records.len(),
    );

    Ok((document, metadata))
}

/// Parse an already-decoded JSON value into a catalog document.
pub fn parse_document(value: Value) -> Result<LoadedDocument> {
    match value {
        Value::Array(items) => Ok(LoadedDocument {
            records: collect_records(items),
            settings: None,
            shape: DocumentShape::Array,
        }),
        Value::Object(mut map) => {
            let Some(raw_settings) = map.shift_remove(SETTINGS_KEY) else {
                return Err(ColanderError::Document(format!(
                    "object document is missing the '{SETTINGS_KEY}' key"
                )));
            };
            let settings: SettingsDiff =
                serde_json::from_value(raw_settings).map_err(|e| {
                    ColanderError::Document(format!("malformed '{SETTINGS_KEY}' value: {e}"))
                })?;

            match map.shift_remove(DATA_KEY) {
                Some(Value::Array(items)) => Ok(LoadedDocument {
                    records: collect_records(items),
                    settings: Some(settings),
                    shape: DocumentShape::Wrapped,
                }),
                leftover => {
                    // Remaining values are kept only when they look like
                    // records.
                    let records: Vec<Record> = leftover
                        .into_iter()
                        .chain(map.into_iter().map(|(_, v)| v))
                        .filter_map(|v| match v {
                            Value::Object(entry) if entry.contains_key(NAME_FIELD) => Some(entry),
                            _ => None,
                        })
                        .collect();

                    Ok(LoadedDocument {
                        records,
                        settings: Some(settings),
                        shape: DocumentShape::Keyed,
                    })
                }
            }
        }
        other => Err(ColanderError::Document(format!(
            "expected a record array or settings-wrapped object, got {}",
            json_kind(&other)
        ))),
    }
}

fn collect_records(items: Vec<Value>) -> Vec<Record> {
    let mut skipped = 0usize;
    let records: Vec<Record> = items
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        log::warn!("skipped {skipped} non-object entries in record array");
    }
    records
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let doc = parse_document(json!([
            { "name": "GRINNING FACE", "unified": "1F600" },
            { "name": "THUMBS UP", "unified": "1F44D" },
        ]))
        .unwrap();

        assert_eq!(doc.shape, DocumentShape::Array);
        assert_eq!(doc.records.len(), 2);
        assert!(doc.settings.is_none());
    }

    #[test]
    fn test_parse_wrapped_document() {
        let doc = parse_document(json!({
            "data": [{ "name": "GRINNING FACE", "unified": "1F600" }],
            "colander_settings": { "fieldsRemoved": ["obsoleted_by"] },
        }))
        .unwrap();

        assert_eq!(doc.shape, DocumentShape::Wrapped);
        assert_eq!(doc.records.len(), 1);
        let settings = doc.settings.unwrap();
        assert_eq!(
            settings.fields_removed,
            Some(vec!["obsoleted_by".to_string()])
        );
    }

    #[test]
    fn test_parse_keyed_document_filters_record_like_values() {
        let doc = parse_document(json!({
            "colander_settings": {},
            "grinning": { "name": "GRINNING FACE", "unified": "1F600" },
            "version": "15.1",
            "count": 2,
            "stray": { "unified": "1F44D" },
        }))
        .unwrap();

        assert_eq!(doc.shape, DocumentShape::Keyed);
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].get("unified"), Some(&json!("1F600")));
    }

    #[test]
    fn test_object_without_settings_key_is_rejected() {
        let err = parse_document(json!({ "data": [] })).unwrap_err();
        assert!(matches!(err, ColanderError::Document(_)));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let err = parse_document(json!("nope")).unwrap_err();
        assert!(matches!(err, ColanderError::Document(_)));
    }

    #[test]
    fn test_malformed_settings_value_is_rejected() {
        let err = parse_document(json!({
            "colander_settings": "not an object",
            "data": [],
        }))
        .unwrap_err();
        assert!(matches!(err, ColanderError::Document(_)));
    }

    #[test]
    fn test_non_object_array_entries_are_skipped() {
        let doc = parse_document(json!([
            { "name": "GRINNING FACE", "unified": "1F600" },
            "stray",
            42,
        ]))
        .unwrap();
        assert_eq!(doc.records.len(), 1);
    }

    #[test]
    fn test_load_file_reports_metadata() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "name": "GRINNING FACE", "unified": "1F600" }}]"#
        )
        .unwrap();

        let (doc, meta) = load_file(file.path()).unwrap();
        assert_eq!(doc.records.len(), 1);
        assert_eq!(meta.record_count, 1);
        assert_eq!(meta.shape, DocumentShape::Array);
        assert!(meta.hash.starts_with("sha256:"));
        assert!(meta.size_bytes > 0);
    }

    #[test]
    fn test_load_file_rejects_invalid_json() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, ColanderError::Json(_)));
    }
}

//! Field schema entries and path conventions.
//!
//! A field path is a dotted string: `"name"` addresses a top-level field,
//! `"skin_variations.image"` addresses a pooled sub-field of the variant
//! group. Only one level of nesting is addressed; deeper structure stays
//! opaque inside the value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::FieldKind;

/// Maximum example values held per field path.
pub const MAX_EXAMPLES: usize = 3;

/// The parent of a sub-field path, `None` for top-level paths.
pub fn parent_of(path: &str) -> Option<&str> {
    path.rfind('.').map(|idx| &path[..idx])
}

/// The final component of a path: the field name as it appears inside a
/// record (or inside a variant entry).
pub fn leaf_of(path: &str) -> &str {
    path.rfind('.').map_or(path, |idx| &path[idx + 1..])
}

/// Schema entry for one field path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Type tag from the first value seen at this path.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Number of records containing the path.
    pub usage: usize,
    /// Up to [`MAX_EXAMPLES`] values for display; nulls and empty strings
    /// never qualify.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<Value>,
    /// Whether any record held null at this path.
    pub has_null: bool,
    /// Whether any record held an empty string at this path.
    pub has_empty_string: bool,
    /// Whether the path addresses a variant sub-field.
    pub is_sub_field: bool,
    /// Parent path, present on sub-field entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl FieldInfo {
    pub(crate) fn new(kind: FieldKind, is_sub_field: bool, parent: Option<&str>) -> Self {
        Self {
            kind,
            usage: 0,
            examples: Vec::new(),
            has_null: false,
            has_empty_string: false,
            is_sub_field,
            parent: parent.map(str::to_string),
        }
    }

    /// Count one record containing the path and fold in its value.
    pub(crate) fn observe(&mut self, value: &Value) {
        self.usage += 1;
        self.note_value(value);
    }

    /// Fold in a value without counting usage. Used for repeat variant
    /// instances of a pooled sub-field within one record.
    pub(crate) fn note_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.has_null = true,
            Value::String(s) if s.is_empty() => self.has_empty_string = true,
            other => {
                if self.examples.len() < MAX_EXAMPLES {
                    self.examples.push(other.clone());
                }
            }
        }
    }
}

/// The inferred union of field paths across a collection, in first-seen
/// order.
///
/// Always rebuilt wholesale when the collection changes, never patched in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Path → entry.
    pub fields: IndexMap<String, FieldInfo>,
}

impl FieldSchema {
    /// All field paths in schema order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Entry for a path.
    pub fn get(&self, path: &str) -> Option<&FieldInfo> {
        self.fields.get(path)
    }

    /// Whether the path was seen in the collection.
    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// Sub-field paths recorded under a parent path.
    pub fn sub_paths_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields.iter().filter_map(move |(path, info)| {
            (info.is_sub_field && info.parent.as_deref() == Some(parent))
                .then_some(path.as_str())
        })
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for the schema of an empty collection.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_helpers() {
        assert_eq!(parent_of("name"), None);
        assert_eq!(parent_of("skin_variations.image"), Some("skin_variations"));
        assert_eq!(leaf_of("name"), "name");
        assert_eq!(leaf_of("skin_variations.image"), "image");
    }

    #[test]
    fn test_note_value_flags_and_examples() {
        let mut info = FieldInfo::new(FieldKind::String, false, None);

        info.observe(&Value::String("a".to_string()));
        info.observe(&Value::Null);
        info.observe(&Value::String(String::new()));
        info.observe(&Value::String("b".to_string()));
        info.observe(&Value::String("c".to_string()));
        info.observe(&Value::String("d".to_string()));

        assert_eq!(info.usage, 6);
        assert!(info.has_null);
        assert!(info.has_empty_string);
        assert_eq!(info.examples.len(), MAX_EXAMPLES);
        assert_eq!(info.examples[0], Value::String("a".to_string()));
    }
}

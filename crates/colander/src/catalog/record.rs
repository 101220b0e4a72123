//! The record type and the reserved field names of the catalog shape.

use serde_json::Value;

/// One catalog entry: an ordered mapping from field name to JSON value.
///
/// Field order is preserved through load, filter, and export so that
/// re-exports of an unmodified collection diff cleanly.
pub type Record = serde_json::Map<String, Value>;

/// Field holding the record's canonical codepoint string (e.g. `"1F600"`).
pub const IDENTITY_FIELD: &str = "unified";

/// Field holding the record's display name.
pub const NAME_FIELD: &str = "name";

/// Field holding the record's categorical label.
pub const CATEGORY_FIELD: &str = "category";

/// Field holding the record's searchable alias list.
pub const ALIAS_FIELD: &str = "short_names";

/// Reserved nested field mapping variant keys to partial override records.
pub const VARIANT_FIELD: &str = "skin_variations";

/// Reserved top-level key carrying the settings diff in wrapped documents.
pub const SETTINGS_KEY: &str = "colander_settings";

/// Key of the record array inside a wrapped document.
pub const DATA_KEY: &str = "data";

/// Label under which records without a category are tallied.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// The raw codepoint string stored on the record, if any.
pub fn identity_value(record: &Record) -> Option<&str> {
    record.get(IDENTITY_FIELD).and_then(Value::as_str)
}

/// The record's display name, if any.
pub fn display_name(record: &Record) -> Option<&str> {
    record.get(NAME_FIELD).and_then(Value::as_str)
}

/// The record's raw categorical label, if any.
pub fn category_label(record: &Record) -> Option<&str> {
    record.get(CATEGORY_FIELD).and_then(Value::as_str)
}

/// The record's own alias terms. Missing, null, or non-array alias fields
/// yield an empty list.
pub fn alias_terms(record: &Record) -> Vec<String> {
    match record.get(ALIAS_FIELD) {
        Some(Value::Array(terms)) => terms
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

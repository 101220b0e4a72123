//! Single-pass field discovery over a record collection.

use indexmap::IndexSet;
use serde_json::Value;

use crate::catalog::{Record, VARIANT_FIELD};
use super::field::{parent_of, FieldInfo, FieldSchema};
use super::types::FieldKind;

/// Walk the collection once and produce the union of its field paths.
///
/// Every top-level key is recorded. When the variant-group field holds a
/// mapping, the group is recorded as a field itself and every key
/// appearing in any of its variant values is recorded as a pooled
/// sub-field path (`skin_variations.<key>`). Sub-field usage counts
/// presence per record, not per variant instance; type tags, flags, and
/// examples pool across all instances. The first value seen at a path
/// fixes its type tag.
///
/// An empty collection yields an empty schema. The input is not mutated.
pub fn analyze(records: &[Record]) -> FieldSchema {
    let mut schema = FieldSchema::default();

    for record in records {
        for (key, value) in record {
            if key == VARIANT_FIELD {
                if let Value::Object(variants) = value {
                    record_path(&mut schema, key, value, false);
                    record_variant_fields(&mut schema, key, variants);
                    continue;
                }
            }
            record_path(&mut schema, key, value, false);
        }
    }

    schema
}

fn record_variant_fields(
    schema: &mut FieldSchema,
    group: &str,
    variants: &serde_json::Map<String, Value>,
) {
    // Each distinct sub-field counts once for this record; later
    // instances only pool their value statistics.
    let mut seen: IndexSet<&str> = IndexSet::new();

    for variant in variants.values() {
        let Value::Object(entry) = variant else {
            continue;
        };
        for (sub_key, sub_value) in entry {
            let path = format!("{group}.{sub_key}");
            if seen.insert(sub_key.as_str()) {
                record_path(schema, &path, sub_value, true);
            } else if let Some(info) = schema.fields.get_mut(&path) {
                info.note_value(sub_value);
            }
        }
    }
}

fn record_path(schema: &mut FieldSchema, path: &str, value: &Value, is_sub_field: bool) {
    if let Some(info) = schema.fields.get_mut(path) {
        info.observe(value);
        return;
    }
    let mut info = FieldInfo::new(FieldKind::of(value), is_sub_field, parent_of(path));
    info.observe(value);
    schema.fields.insert(path.to_string(), info);
}

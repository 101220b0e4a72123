//! Deterministic per-record filtering.
//!
//! [`filter_record`] applies the current rule set to one record and
//! produces its output form, or `None` when the record is excluded
//! entirely. It is pure: safe to call speculatively for previews, and
//! called once per record during export.

use serde_json::Value;

use crate::catalog::{self, Record, ALIAS_FIELD, CATEGORY_FIELD, VARIANT_FIELD};
use crate::identity;
use crate::rules::RuleSet;
use crate::schema::leaf_of;

/// Options consulted while filtering a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Assign fields whose resolved value is null or the empty string.
    pub include_empty: bool,
    /// Apply registered field renames to output names.
    pub apply_renames: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            include_empty: true,
            apply_renames: true,
        }
    }
}

/// Produce the filtered/renamed/remapped output form of one record.
///
/// In order: the record's effective category is resolved through the
/// remap buckets; excluded labels drop the record outright; each selected
/// field path is then assigned in selection order, with the category
/// substitution, alias merging, and variant-group rebuild described by
/// the rule set. Returns `None` when the record is excluded or nothing
/// remains.
pub fn filter_record(record: &Record, rules: &RuleSet, options: FilterOptions) -> Option<Record> {
    let raw_category = catalog::category_label(record);
    let remapped = raw_category.and_then(|raw| rules.remap_target(raw));
    if let Some(label) = remapped.or(raw_category) {
        if rules.excluded().contains(label) {
            return None;
        }
    }

    let identity = identity::record_identity(record);

    let mut out = Record::new();
    for path in rules.selected() {
        let key = output_key(rules, path, options.apply_renames);

        if path == CATEGORY_FIELD {
            if let Some(label) = remapped {
                out.insert(key.to_string(), Value::String(label.to_string()));
                continue;
            }
        }

        if path == ALIAS_FIELD && record.contains_key(ALIAS_FIELD) {
            let mut merged: Vec<Value> = match record.get(ALIAS_FIELD) {
                Some(Value::Array(own)) => own.clone(),
                _ => Vec::new(),
            };
            if let Some(id) = &identity {
                merged.extend(
                    rules
                        .alias_terms_for(id)
                        .iter()
                        .map(|term| Value::String(term.clone())),
                );
            }
            if !options.include_empty && merged.is_empty() {
                continue;
            }
            out.insert(key.to_string(), Value::Array(merged));
            continue;
        }

        let Some(value) = record.get(path.as_str()) else {
            continue;
        };

        if path == VARIANT_FIELD {
            if let Value::Object(variants) = value {
                if let Some(rebuilt) = rebuild_variants(variants, rules, options) {
                    out.insert(key.to_string(), Value::Object(rebuilt));
                }
                continue;
            }
        }

        if !options.include_empty && is_empty_value(value) {
            continue;
        }
        out.insert(key.to_string(), value.clone());
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Rebuild the variant group from its selected sub-field paths. Variant
/// entries keeping zero fields drop out; an entirely empty group is
/// omitted from the output.
fn rebuild_variants(
    variants: &serde_json::Map<String, Value>,
    rules: &RuleSet,
    options: FilterOptions,
) -> Option<serde_json::Map<String, Value>> {
    let prefix = format!("{VARIANT_FIELD}.");
    let sub_paths: Vec<&String> = rules
        .selected()
        .iter()
        .filter(|path| path.starts_with(&prefix))
        .collect();

    let mut rebuilt = serde_json::Map::new();
    for (variant_key, variant_value) in variants {
        let Value::Object(entry) = variant_value else {
            continue;
        };
        let mut kept = serde_json::Map::new();
        for path in &sub_paths {
            let sub_key = &path[prefix.len()..];
            if let Some(sub_value) = entry.get(sub_key) {
                let key = output_key(rules, path, options.apply_renames);
                kept.insert(key.to_string(), sub_value.clone());
            }
        }
        if !kept.is_empty() {
            rebuilt.insert(variant_key.clone(), Value::Object(kept));
        }
    }

    (!rebuilt.is_empty()).then_some(rebuilt)
}

fn output_key<'a>(rules: &'a RuleSet, path: &'a str, apply_renames: bool) -> &'a str {
    if apply_renames {
        rules.output_name(path)
    } else {
        leaf_of(path)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::analyze;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn thumbs_up() -> Record {
        record(json!({
            "name": "THUMBS UP SIGN",
            "unified": "1F44D",
            "category": "People & Body",
            "short_names": ["thumbsup", "+1"],
            "docomo": null,
            "au": "",
            "sort_order": 12,
            "skin_variations": {
                "1F3FB": { "unified": "1F44D-1F3FB", "image": "1f44d-1f3fb.png" },
                "1F3FC": { "unified": "1F44D-1F3FC", "image": "1f44d-1f3fc.png" },
            }
        }))
    }

    fn full_rules(records: &[Record]) -> RuleSet {
        let schema = analyze(records);
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        rules
    }

    #[test]
    fn test_full_selection_reproduces_the_record() {
        let rec = thumbs_up();
        let rules = full_rules(std::slice::from_ref(&rec));

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(out, rec);
    }

    #[test]
    fn test_empty_selection_drops_the_record() {
        let rec = thumbs_up();
        let rules = RuleSet::new();

        assert!(filter_record(&rec, &rules, FilterOptions::default()).is_none());
    }

    #[test]
    fn test_excluded_raw_category_drops_without_any_remap() {
        let rec = thumbs_up();
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules.exclude_label("People & Body");

        assert!(filter_record(&rec, &rules, FilterOptions::default()).is_none());
    }

    #[test]
    fn test_remap_substitutes_the_category_value() {
        let rec = thumbs_up();
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules
            .merge_categories("Bodies", &["People & Body".to_string()])
            .unwrap();

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(out.get("category"), Some(&json!("Bodies")));
    }

    #[test]
    fn test_excluding_remap_target_drops_source_records() {
        let rec = thumbs_up();
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules
            .merge_categories("Bodies", &["People & Body".to_string()])
            .unwrap();
        rules.exclude_label("Bodies");

        assert!(filter_record(&rec, &rules, FilterOptions::default()).is_none());
    }

    #[test]
    fn test_custom_aliases_append_after_own_terms() {
        let rec = thumbs_up();
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules.add_alias("1F44D", "approve", &[]).unwrap();

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(
            out.get("short_names"),
            Some(&json!(["thumbsup", "+1", "approve"]))
        );
    }

    #[test]
    fn test_alias_field_absent_from_record_stays_absent() {
        let rec = record(json!({ "unified": "1F602", "name": "TEARS" }));
        let schema = analyze(std::slice::from_ref(&rec));
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        rules.select_field("short_names");
        rules.add_alias("1F602", "lol", &[]).unwrap();

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert!(!out.contains_key("short_names"));
    }

    #[test]
    fn test_null_alias_list_still_collects_custom_terms() {
        let rec = record(json!({ "unified": "1F602", "short_names": null }));
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules.add_alias("1F602", "lol", &[]).unwrap();

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(out.get("short_names"), Some(&json!(["lol"])));
    }

    #[test]
    fn test_variant_rebuild_keeps_only_selected_sub_fields() {
        let rec = thumbs_up();
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules.deselect_field("skin_variations.unified");

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(
            out.get("skin_variations"),
            Some(&json!({
                "1F3FB": { "image": "1f44d-1f3fb.png" },
                "1F3FC": { "image": "1f44d-1f3fc.png" },
            }))
        );
    }

    #[test]
    fn test_variant_group_omitted_when_no_sub_fields_remain() {
        let rec = thumbs_up();
        let mut rules = full_rules(std::slice::from_ref(&rec));
        rules.deselect_field("skin_variations.unified");
        rules.deselect_field("skin_variations.image");
        // the group itself is still selected
        rules.select_field("skin_variations");

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert!(!out.contains_key("skin_variations"));
    }

    #[test]
    fn test_sub_field_renames_apply_inside_variants() {
        let rec = thumbs_up();
        let schema = analyze(std::slice::from_ref(&rec));
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        rules.deselect_field("skin_variations.unified");
        rules
            .rename_field("skin_variations.image", "file", &schema)
            .unwrap();

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(
            out.get("skin_variations").unwrap()["1F3FB"],
            json!({ "file": "1f44d-1f3fb.png" })
        );
    }

    #[test]
    fn test_renames_are_bypassed_when_disabled() {
        let rec = thumbs_up();
        let schema = analyze(std::slice::from_ref(&rec));
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        rules.rename_field("name", "title", &schema).unwrap();

        let options = FilterOptions {
            apply_renames: false,
            ..Default::default()
        };
        let out = filter_record(&rec, &rules, options).unwrap();
        assert!(out.contains_key("name"));
        assert!(!out.contains_key("title"));
    }

    #[test]
    fn test_empty_values_skipped_when_disabled() {
        let rec = thumbs_up();
        let rules = full_rules(std::slice::from_ref(&rec));

        let options = FilterOptions {
            include_empty: false,
            ..Default::default()
        };
        let out = filter_record(&rec, &rules, options).unwrap();
        assert!(!out.contains_key("docomo"));
        assert!(!out.contains_key("au"));
        assert!(out.contains_key("sort_order"));
    }

    #[test]
    fn test_empty_values_kept_by_default() {
        let rec = thumbs_up();
        let rules = full_rules(std::slice::from_ref(&rec));

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        assert_eq!(out.get("docomo"), Some(&json!(null)));
        assert_eq!(out.get("au"), Some(&json!("")));
    }

    #[test]
    fn test_output_keys_follow_selection_order() {
        let rec = thumbs_up();
        let mut rules = RuleSet::new();
        rules.select_field("sort_order");
        rules.select_field("name");

        let out = filter_record(&rec, &rules, FilterOptions::default()).unwrap();
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["sort_order", "name"]);
    }
}

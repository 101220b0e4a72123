//! Settings replay.
//!
//! Rebuilds a rule set from a persisted settings-diff against a freshly
//! loaded collection. Replay is forgiving: entries that no longer match
//! the collection are dropped and counted rather than failing the load.

use indexmap::IndexSet;

use crate::catalog::Record;
use crate::identity;
use crate::replay::aliases;
use crate::rules::{RuleSet, SettingsDiff};
use crate::schema::FieldSchema;

/// A rule set rebuilt from a persisted diff, with counts of the entries
/// that could not be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    /// The reconstructed rules.
    pub rules: RuleSet,
    /// Removed-field paths absent from the fresh schema.
    pub dropped_fields: usize,
    /// Removed identities matching no record in the collection.
    pub unresolved_identities: usize,
}

/// Rebuild rules from `diff` for a collection of `base` records.
///
/// Field selection becomes the schema's paths minus `fieldsRemoved`;
/// paths the schema no longer has are dropped silently. Removed
/// identities are normalized and kept only when some base record carries
/// them. Category mappings and exclusions restore verbatim. Custom
/// aliases are re-detected from `uploaded` records when the settings
/// arrived alongside data, otherwise from the base itself, which yields
/// none.
pub fn replay(
    base: &[Record],
    schema: &FieldSchema,
    diff: &SettingsDiff,
    uploaded: Option<&[Record]>,
) -> ReplayOutcome {
    let mut rules = RuleSet::new();

    let mut dropped_fields = 0;
    match &diff.fields_removed {
        Some(removed) => {
            let drop: IndexSet<&str> = removed.iter().map(String::as_str).collect();
            dropped_fields = drop.iter().filter(|path| !schema.contains(path)).count();
            for path in schema.paths() {
                if !drop.contains(path) {
                    rules.select_field(path);
                }
            }
        }
        None => rules.select_all(schema),
    }

    let mut unresolved_identities = 0;
    if let Some(removed) = &diff.removed_emojis {
        let known: IndexSet<String> = base.iter().filter_map(identity::record_identity).collect();
        for raw in removed {
            let id = identity::normalize(raw);
            if known.contains(&id) {
                rules.remove_identity(&id);
            } else {
                unresolved_identities += 1;
            }
        }
    }

    if let Some(mappings) = &diff.category_mappings {
        for (label, sources) in mappings {
            rules.restore_remap(label, sources);
        }
    }
    if let Some(excluded) = &diff.excluded_categories {
        for label in excluded {
            rules.exclude_label(label.clone());
        }
    }

    let (custom, _) = aliases::detect(uploaded.unwrap_or(base), base);
    rules.replace_aliases(custom);

    if dropped_fields + unresolved_identities > 0 {
        log::info!(
            "replay dropped {dropped_fields} stale field paths and {unresolved_identities} unresolved identities"
        );
    }

    ReplayOutcome {
        rules,
        dropped_fields,
        unresolved_identities,
    }
}

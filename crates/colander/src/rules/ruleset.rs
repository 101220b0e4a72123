//! The declarative transform rule set.
//!
//! A [`RuleSet`] is pure data: which field paths stay in the output, how
//! fields are renamed, which records are removed, how category labels are
//! folded together or excluded, and which custom alias terms were added
//! per record. Mutators enforce the structural invariants (selection
//! cascades, bijective renames, one bucket per source label) and either
//! succeed completely or leave the rule set untouched.

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ColanderError, Result};
use crate::identity;
use crate::schema::{parent_of, CategoryUsage, FieldSchema};
use super::diff::SettingsDiff;

static OUTPUT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// The complete set of user customizations applied during filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Field paths included in the output, in selection order.
    selected: IndexSet<String>,
    /// Field path → output name.
    renames: IndexMap<String, String>,
    /// Normalized identities of removed records.
    removed: IndexSet<String>,
    /// New label → source labels folded into it.
    remaps: IndexMap<String, Vec<String>>,
    /// Labels excluded from the output.
    excluded: IndexSet<String>,
    /// Normalized record identity → user-added alias terms.
    aliases: IndexMap<String, Vec<String>>,
}

impl RuleSet {
    /// An empty rule set: nothing selected, nothing changed.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== field selection =====

    /// Selected field paths in selection order.
    pub fn selected(&self) -> &IndexSet<String> {
        &self.selected
    }

    /// Whether a path is selected.
    pub fn is_selected(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    /// Select a field path. Selecting a sub-field also selects its
    /// parent.
    pub fn select_field(&mut self, path: &str) {
        if let Some(parent) = parent_of(path) {
            self.selected.insert(parent.to_string());
        }
        self.selected.insert(path.to_string());
    }

    /// Deselect a field path. Deselecting a parent cascades to every
    /// sub-field under it.
    pub fn deselect_field(&mut self, path: &str) {
        self.selected.shift_remove(path);
        let prefix = format!("{path}.");
        self.selected.retain(|p| !p.starts_with(&prefix));
    }

    /// Replace the selection with every schema path, in schema order.
    pub fn select_all(&mut self, schema: &FieldSchema) {
        self.selected = schema.paths().map(str::to_string).collect();
    }

    /// Replace the selection with the given paths, dropping paths absent
    /// from the schema and re-establishing the parent invariant.
    pub fn set_selection<'a, I>(&mut self, paths: I, schema: &FieldSchema)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.selected.clear();
        for path in paths {
            if schema.contains(path) {
                self.select_field(path);
            }
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // ===== field renames =====

    /// Current renames, path → output name.
    pub fn renames(&self) -> &IndexMap<String, String> {
        &self.renames
    }

    /// The output name for a path: its rename when one exists, else the
    /// field's own name.
    pub fn output_name<'a>(&'a self, path: &'a str) -> &'a str {
        self.renames
            .get(path)
            .map(String::as_str)
            .unwrap_or_else(|| crate::schema::leaf_of(path))
    }

    /// Register an output rename for a field path.
    ///
    /// The new name must be a bare identifier, must not collide with an
    /// existing schema path, and must not be in use by another rename.
    /// Renaming a path to itself clears its rename instead.
    pub fn rename_field(
        &mut self,
        path: &str,
        new_name: &str,
        schema: &FieldSchema,
    ) -> Result<()> {
        let new_name = new_name.trim();
        if new_name == path {
            self.renames.shift_remove(path);
            return Ok(());
        }
        if !OUTPUT_NAME.is_match(new_name) {
            return Err(ColanderError::Rename(format!(
                "'{new_name}' is not a valid field name"
            )));
        }
        if schema.contains(new_name) {
            return Err(ColanderError::Rename(format!(
                "'{new_name}' is already a field in the collection"
            )));
        }
        if self
            .renames
            .iter()
            .any(|(other, name)| name == new_name && other != path)
        {
            return Err(ColanderError::Rename(format!(
                "'{new_name}' is already used by another rename"
            )));
        }
        self.renames.insert(path.to_string(), new_name.to_string());
        Ok(())
    }

    /// Install a rename verbatim, skipping the validation of
    /// [`rename_field`](Self::rename_field). Used when restoring
    /// persisted state that was validated when first entered.
    pub fn restore_rename(&mut self, path: &str, output: &str) {
        self.renames.insert(path.to_string(), output.to_string());
    }

    /// Drop the rename for a path. Returns whether one existed.
    pub fn clear_rename(&mut self, path: &str) -> bool {
        self.renames.shift_remove(path).is_some()
    }

    /// Drop every rename.
    pub fn clear_renames(&mut self) {
        self.renames.clear();
    }

    // ===== removed records =====

    /// Normalized identities of removed records.
    pub fn removed(&self) -> &IndexSet<String> {
        &self.removed
    }

    /// Whether a record identity is removed. The identity is normalized
    /// before the lookup.
    pub fn is_removed(&self, identity: &str) -> bool {
        self.removed.contains(identity::normalize(identity).as_str())
    }

    /// Mark a record identity as removed.
    pub fn remove_identity(&mut self, identity: &str) {
        self.removed.insert(identity::normalize(identity));
    }

    /// Restore a removed record. Returns whether it was removed.
    pub fn restore_identity(&mut self, identity: &str) -> bool {
        self.removed
            .shift_remove(identity::normalize(identity).as_str())
    }

    /// Restore every removed record.
    pub fn clear_removed(&mut self) {
        self.removed.clear();
    }

    // ===== category remaps and exclusions =====

    /// Remap buckets, new label → source labels.
    pub fn remaps(&self) -> &IndexMap<String, Vec<String>> {
        &self.remaps
    }

    /// Excluded labels.
    pub fn excluded(&self) -> &IndexSet<String> {
        &self.excluded
    }

    /// The bucket label a raw category folds into, if any. Buckets are
    /// consulted in insertion order; the first containing the label wins.
    pub fn remap_target(&self, raw: &str) -> Option<&str> {
        self.remaps.iter().find_map(|(label, sources)| {
            sources.iter().any(|s| s == raw).then_some(label.as_str())
        })
    }

    /// The label a record with this raw category carries in the output.
    pub fn effective_category<'a>(&'a self, raw: &'a str) -> &'a str {
        self.remap_target(raw).unwrap_or(raw)
    }

    /// Whether records with this raw category are excluded, following the
    /// remap first.
    pub fn excludes_category(&self, raw: &str) -> bool {
        self.excluded.contains(self.effective_category(raw))
    }

    /// Fold source labels into a bucket under a new label.
    ///
    /// A source that is itself a bucket name is absorbed: its sources move
    /// into the new bucket and the old bucket disappears. Sources held by
    /// other buckets migrate to the new one, and drained buckets are
    /// dropped. Exclusions of the source labels are cleared; an exclusion
    /// of the new label itself is left alone.
    pub fn merge_categories(&mut self, new_label: &str, sources: &[String]) -> Result<()> {
        let new_label = new_label.trim();
        if new_label.is_empty() {
            return Err(ColanderError::Label("merged label is empty".to_string()));
        }
        if sources.is_empty() {
            return Err(ColanderError::Label(
                "no source labels to merge".to_string(),
            ));
        }

        let mut folded: IndexSet<String> = IndexSet::new();
        for label in sources {
            match self.remaps.shift_remove(label.as_str()) {
                Some(absorbed) => folded.extend(absorbed),
                None => {
                    folded.insert(label.clone());
                }
            }
            self.excluded.shift_remove(label.as_str());
        }

        // A source label lives in at most one bucket.
        for bucket in self.remaps.values_mut() {
            bucket.retain(|l| !folded.contains(l.as_str()));
        }
        self.remaps.retain(|_, bucket| !bucket.is_empty());

        self.remaps
            .insert(new_label.to_string(), folded.into_iter().collect());
        Ok(())
    }

    /// Rename a label in place, whether it is a bucket name or an
    /// original label.
    ///
    /// Renaming a bucket keeps its position and sources. Renaming an
    /// original label creates a single-source bucket. The exclusion entry
    /// follows the rename. Collisions with existing bucket names or
    /// original labels are rejected.
    pub fn rename_category(
        &mut self,
        old: &str,
        new: &str,
        categories: &CategoryUsage,
    ) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(ColanderError::Label("new label is empty".to_string()));
        }
        if new == old {
            return Ok(());
        }
        if self.remaps.contains_key(new) || categories.contains(new) {
            return Err(ColanderError::Label(format!(
                "'{new}' already names a category"
            )));
        }

        if self.remaps.contains_key(old) {
            let remaps = std::mem::take(&mut self.remaps);
            self.remaps = remaps
                .into_iter()
                .map(|(label, sources)| {
                    if label == old {
                        (new.to_string(), sources)
                    } else {
                        (label, sources)
                    }
                })
                .collect();
        } else {
            self.remaps.insert(new.to_string(), vec![old.to_string()]);
        }

        if self.excluded.shift_remove(old) {
            self.excluded.insert(new.to_string());
        }
        Ok(())
    }

    /// Install a bucket verbatim, without the absorption or exclusion
    /// bookkeeping of [`merge_categories`](Self::merge_categories). Used
    /// when restoring persisted mappings, which are treated as opaque.
    pub fn restore_remap(&mut self, label: &str, sources: &[String]) {
        self.remaps.insert(label.to_string(), sources.to_vec());
    }

    /// Delete a bucket, restoring its sources to passthrough. Clears the
    /// bucket's exclusion entry. Returns whether the bucket existed.
    pub fn delete_remap(&mut self, label: &str) -> bool {
        if self.remaps.shift_remove(label).is_none() {
            return false;
        }
        self.excluded.shift_remove(label);
        true
    }

    /// Remove one source label from a bucket; the bucket is dropped when
    /// it empties. Returns whether the source was present.
    pub fn remove_remap_source(&mut self, bucket: &str, source: &str) -> bool {
        let Some(sources) = self.remaps.get_mut(bucket) else {
            return false;
        };
        let before = sources.len();
        sources.retain(|l| l != source);
        let changed = sources.len() != before;
        if sources.is_empty() {
            self.remaps.shift_remove(bucket);
        }
        changed
    }

    /// Exclude a label (original or bucket name) from the output.
    pub fn exclude_label(&mut self, label: impl Into<String>) {
        self.excluded.insert(label.into());
    }

    /// Stop excluding a label. Returns whether it was excluded.
    pub fn include_label(&mut self, label: &str) -> bool {
        self.excluded.shift_remove(label)
    }

    // ===== custom aliases =====

    /// Custom alias terms, normalized identity → terms.
    pub fn custom_aliases(&self) -> &IndexMap<String, Vec<String>> {
        &self.aliases
    }

    /// Custom alias terms for one record.
    pub fn alias_terms_for(&self, identity: &str) -> &[String] {
        self.aliases
            .get(identity::normalize(identity).as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Add a custom alias term for a record.
    ///
    /// The term is trimmed and lowercased. Empty terms, and terms already
    /// present case-insensitively among the record's own aliases
    /// (`own_terms`) or its custom terms, are rejected.
    pub fn add_alias(&mut self, identity: &str, term: &str, own_terms: &[String]) -> Result<()> {
        let identity = identity::normalize(identity);
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Err(ColanderError::Alias("term is empty".to_string()));
        }

        let custom = self
            .aliases
            .get(identity.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if own_terms
            .iter()
            .chain(custom.iter())
            .any(|existing| existing.to_lowercase() == term)
        {
            return Err(ColanderError::Alias(format!(
                "'{term}' is already a search term for this record"
            )));
        }

        self.aliases
            .entry(identity)
            .or_insert_with(Vec::new)
            .push(term);
        Ok(())
    }

    /// Remove one custom term from a record. Empty term lists are
    /// dropped. Returns whether the term was present.
    pub fn remove_alias(&mut self, identity: &str, term: &str) -> bool {
        let identity = identity::normalize(identity);
        let Some(terms) = self.aliases.get_mut(identity.as_str()) else {
            return false;
        };
        let before = terms.len();
        terms.retain(|t| t != term);
        let changed = terms.len() != before;
        if terms.is_empty() {
            self.aliases.shift_remove(identity.as_str());
        }
        changed
    }

    /// Replace one record's custom terms wholesale. An empty list clears
    /// the entry.
    pub fn set_alias_terms(&mut self, identity: &str, terms: Vec<String>) {
        let identity = identity::normalize(identity);
        if terms.is_empty() {
            self.aliases.shift_remove(identity.as_str());
        } else {
            self.aliases.insert(identity, terms);
        }
    }

    /// Replace the whole custom-alias map, normalizing identities.
    pub fn replace_aliases(&mut self, aliases: IndexMap<String, Vec<String>>) {
        self.aliases = aliases
            .into_iter()
            .filter(|(_, terms)| !terms.is_empty())
            .map(|(identity, terms)| (identity::normalize(&identity), terms))
            .collect();
    }

    /// Drop every custom alias.
    pub fn clear_aliases(&mut self) {
        self.aliases.clear();
    }

    // ===== projection and reset =====

    /// Project the rule set onto the minimal wire diff, relative to a
    /// full selection of the given schema. Empty change categories are
    /// omitted entirely.
    pub fn diff(&self, schema: &FieldSchema) -> SettingsDiff {
        let fields_removed: Vec<String> = schema
            .paths()
            .filter(|path| !self.selected.contains(*path))
            .map(str::to_string)
            .collect();

        SettingsDiff {
            fields_removed: (!fields_removed.is_empty()).then_some(fields_removed),
            removed_emojis: (!self.removed.is_empty())
                .then(|| self.removed.iter().cloned().collect()),
            category_mappings: (!self.remaps.is_empty()).then(|| {
                self.remaps
                    .iter()
                    .map(|(label, sources)| (label.clone(), sources.clone()))
                    .collect()
            }),
            excluded_categories: (!self.excluded.is_empty())
                .then(|| self.excluded.iter().cloned().collect()),
        }
    }

    /// Drop every customization.
    pub fn reset(&mut self) {
        *self = RuleSet::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::analyze;
    use serde_json::json;

    fn schema_for(value: serde_json::Value) -> FieldSchema {
        let records: Vec<crate::catalog::Record> = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::Object(map) => map,
                    _ => panic!("test records must be objects"),
                })
                .collect(),
            _ => panic!("test fixture must be an array"),
        };
        analyze(&records)
    }

    fn variant_schema() -> FieldSchema {
        schema_for(json!([
            {
                "name": "THUMBS UP",
                "unified": "1F44D",
                "category": "People & Body",
                "skin_variations": {
                    "1F3FB": { "unified": "1F44D-1F3FB", "image": "a.png" }
                }
            }
        ]))
    }

    // ===== selection =====

    #[test]
    fn test_deselecting_parent_cascades_to_sub_fields() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        assert!(rules.is_selected("skin_variations.image"));

        rules.deselect_field("skin_variations");

        assert!(!rules.is_selected("skin_variations"));
        assert!(!rules.is_selected("skin_variations.image"));
        assert!(!rules.is_selected("skin_variations.unified"));
        assert!(rules.is_selected("name"));
    }

    #[test]
    fn test_selecting_sub_field_pulls_in_parent() {
        let mut rules = RuleSet::new();
        rules.select_field("skin_variations.image");

        assert!(rules.is_selected("skin_variations"));
        assert!(rules.is_selected("skin_variations.image"));
    }

    #[test]
    fn test_set_selection_drops_stale_paths() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();
        rules.set_selection(
            ["name", "gone_field", "skin_variations.image"],
            &schema,
        );

        assert!(rules.is_selected("name"));
        assert!(!rules.is_selected("gone_field"));
        assert!(rules.is_selected("skin_variations"));
        assert!(rules.is_selected("skin_variations.image"));
    }

    // ===== renames =====

    #[test]
    fn test_rename_rejects_bad_identifiers() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();

        for bad in ["", "9lives", "has space", "dot.ted", "hy-phen"] {
            assert!(rules.rename_field("name", bad, &schema).is_err());
        }
        assert!(rules.renames().is_empty());
    }

    #[test]
    fn test_rename_rejects_collisions() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();

        // collides with an original field
        assert!(rules.rename_field("name", "unified", &schema).is_err());

        rules.rename_field("name", "title", &schema).unwrap();
        // collides with another rename
        assert!(rules.rename_field("category", "title", &schema).is_err());
        // re-renaming the same path is fine
        rules.rename_field("name", "label", &schema).unwrap();
        assert_eq!(rules.output_name("name"), "label");
    }

    #[test]
    fn test_rename_to_self_clears_the_rename() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();
        rules.rename_field("name", "title", &schema).unwrap();

        rules.rename_field("name", "name", &schema).unwrap();
        assert!(rules.renames().is_empty());
        assert_eq!(rules.output_name("name"), "name");
    }

    #[test]
    fn test_output_name_defaults_to_leaf() {
        let rules = RuleSet::new();
        assert_eq!(rules.output_name("skin_variations.image"), "image");
    }

    // ===== removals =====

    #[test]
    fn test_removal_normalizes_identities() {
        let mut rules = RuleSet::new();
        rules.remove_identity("1f600");

        assert!(rules.is_removed("1F600"));
        assert!(rules.is_removed("01F600"));
        assert!(rules.restore_identity("1F600"));
        assert!(!rules.is_removed("1F600"));
    }

    // ===== categories =====

    #[test]
    fn test_merge_folds_and_clears_source_exclusions() {
        let mut rules = RuleSet::new();
        rules.exclude_label("Smileys & Emotion");
        rules
            .merge_categories(
                "Faces",
                &["Smileys & Emotion".to_string(), "People & Body".to_string()],
            )
            .unwrap();

        assert_eq!(rules.remap_target("Smileys & Emotion"), Some("Faces"));
        assert_eq!(rules.remap_target("People & Body"), Some("Faces"));
        assert!(!rules.excluded().contains("Smileys & Emotion"));
    }

    #[test]
    fn test_merge_absorbs_existing_buckets() {
        let mut rules = RuleSet::new();
        rules
            .merge_categories("Faces", &["Smileys & Emotion".to_string()])
            .unwrap();
        rules
            .merge_categories(
                "Everything",
                &["Faces".to_string(), "Flags".to_string()],
            )
            .unwrap();

        assert!(rules.remaps().get("Faces").is_none());
        assert_eq!(
            rules.remaps().get("Everything").unwrap(),
            &vec!["Smileys & Emotion".to_string(), "Flags".to_string()]
        );
    }

    #[test]
    fn test_merge_keeps_one_bucket_per_source() {
        let mut rules = RuleSet::new();
        rules
            .merge_categories("A", &["x".to_string(), "y".to_string()])
            .unwrap();
        rules.merge_categories("B", &["y".to_string()]).unwrap();

        assert_eq!(rules.remaps().get("A").unwrap(), &vec!["x".to_string()]);
        assert_eq!(rules.remaps().get("B").unwrap(), &vec!["y".to_string()]);

        // draining a bucket entirely drops it
        rules.merge_categories("C", &["x".to_string()]).unwrap();
        assert!(rules.remaps().get("A").is_none());
    }

    #[test]
    fn test_first_bucket_wins_for_effective_category() {
        let mut rules = RuleSet::new();
        rules.merge_categories("A", &["x".to_string()]).unwrap();
        rules.merge_categories("B", &["z".to_string()]).unwrap();

        assert_eq!(rules.effective_category("x"), "A");
        assert_eq!(rules.effective_category("unmapped"), "unmapped");
    }

    #[test]
    fn test_excluding_bucket_label_excludes_sources() {
        let mut rules = RuleSet::new();
        rules
            .merge_categories("Faces", &["Smileys & Emotion".to_string()])
            .unwrap();
        rules.exclude_label("Faces");

        assert!(rules.excludes_category("Smileys & Emotion"));
        assert!(!rules.excludes_category("Flags"));
    }

    #[test]
    fn test_rename_category_moves_bucket_and_exclusion() {
        let categories = CategoryUsage::default();
        let mut rules = RuleSet::new();
        rules
            .merge_categories("Faces", &["Smileys & Emotion".to_string()])
            .unwrap();
        rules.exclude_label("Faces");

        rules
            .rename_category("Faces", "Visages", &categories)
            .unwrap();

        assert!(rules.remaps().get("Faces").is_none());
        assert_eq!(rules.remap_target("Smileys & Emotion"), Some("Visages"));
        assert!(rules.excluded().contains("Visages"));
        assert!(!rules.excluded().contains("Faces"));
    }

    #[test]
    fn test_rename_category_wraps_original_label() {
        let schema = variant_schema();
        let _ = schema;
        let mut categories = CategoryUsage::default();
        categories.counts.insert("People & Body".to_string(), 1);

        let mut rules = RuleSet::new();
        rules
            .rename_category("People & Body", "Bodies", &categories)
            .unwrap();

        assert_eq!(rules.remap_target("People & Body"), Some("Bodies"));
    }

    #[test]
    fn test_rename_category_rejects_conflicts() {
        let mut categories = CategoryUsage::default();
        categories.counts.insert("Flags".to_string(), 3);

        let mut rules = RuleSet::new();
        rules
            .merge_categories("Faces", &["Smileys & Emotion".to_string()])
            .unwrap();

        assert!(rules.rename_category("Faces", "Flags", &categories).is_err());
        assert!(rules.rename_category("Flags", "Faces", &categories).is_err());
        assert!(rules.remaps().contains_key("Faces"));
    }

    #[test]
    fn test_delete_remap_clears_its_exclusion() {
        let mut rules = RuleSet::new();
        rules
            .merge_categories("Faces", &["Smileys & Emotion".to_string()])
            .unwrap();
        rules.exclude_label("Faces");

        assert!(rules.delete_remap("Faces"));
        assert!(rules.remaps().is_empty());
        assert!(!rules.excluded().contains("Faces"));
        assert!(!rules.delete_remap("Faces"));
    }

    #[test]
    fn test_remove_remap_source_drops_empty_bucket() {
        let mut rules = RuleSet::new();
        rules
            .merge_categories("AB", &["a".to_string(), "b".to_string()])
            .unwrap();

        assert!(rules.remove_remap_source("AB", "a"));
        assert_eq!(rules.remaps().get("AB").unwrap(), &vec!["b".to_string()]);

        assert!(rules.remove_remap_source("AB", "b"));
        assert!(rules.remaps().is_empty());
        assert!(!rules.remove_remap_source("AB", "b"));
    }

    // ===== aliases =====

    #[test]
    fn test_add_alias_normalizes_and_rejects_duplicates() {
        let own = vec!["joy".to_string(), "Tears".to_string()];
        let mut rules = RuleSet::new();

        rules.add_alias("1F602", "  LOL  ", &own).unwrap();
        assert_eq!(rules.alias_terms_for("1F602"), ["lol"]);

        // duplicate of a custom term
        assert!(rules.add_alias("1F602", "lol", &own).is_err());
        // case-insensitive duplicate of an own term
        assert!(rules.add_alias("1F602", "tears", &own).is_err());
        // empty after trim
        assert!(rules.add_alias("1F602", "   ", &own).is_err());
    }

    #[test]
    fn test_remove_alias_drops_empty_entries() {
        let mut rules = RuleSet::new();
        rules.add_alias("1F602", "lol", &[]).unwrap();

        assert!(rules.remove_alias("1F602", "lol"));
        assert!(rules.custom_aliases().is_empty());
        assert!(!rules.remove_alias("1F602", "lol"));
    }

    // ===== diff and reset =====

    #[test]
    fn test_diff_is_empty_for_full_selection() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();
        rules.select_all(&schema);

        assert!(rules.diff(&schema).is_empty());
    }

    #[test]
    fn test_diff_lists_only_changed_categories() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        rules.deselect_field("skin_variations");
        rules.remove_identity("1F602");

        let diff = rules.diff(&schema);
        assert_eq!(
            diff.fields_removed,
            Some(vec![
                "skin_variations".to_string(),
                "skin_variations.unified".to_string(),
                "skin_variations.image".to_string(),
            ])
        );
        assert_eq!(diff.removed_emojis, Some(vec!["1F602".to_string()]));
        assert_eq!(diff.category_mappings, None);
        assert_eq!(diff.excluded_categories, None);
    }

    #[test]
    fn test_reset_drops_everything() {
        let schema = variant_schema();
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        rules.remove_identity("1F600");
        rules.exclude_label("Flags");

        rules.reset();
        assert_eq!(rules, RuleSet::default());
    }
}

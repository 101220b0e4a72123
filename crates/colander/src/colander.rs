//! Main Colander struct and public API.

use std::io::Write;
use std::path::Path;

use crate::catalog::{self, Record, SourceMetadata};
use crate::error::{ColanderError, Result};
use crate::export::{self, ExportOptions, ExportOutcome};
use crate::filter::filter_record;
use crate::identity;
use crate::replay;
use crate::rules::{FieldPreset, RuleSet, SettingsDiff};
use crate::schema::{analyze, tally_categories, CategoryUsage, FieldSchema};
use crate::session::SessionState;
use crate::store::StateStore;

/// What a file load produced.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Counts from applying embedded settings, when the file carried any.
    pub replay: Option<ReplaySummary>,
}

/// Counts of persisted entries a settings replay could not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Removed-field paths absent from the fresh schema.
    pub dropped_fields: usize,
    /// Removed identities matching no record.
    pub unresolved_identities: usize,
}

/// Outcome of a bulk removal from pasted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRemoval {
    /// Normalized identities removed, in first-seen order.
    pub removed: Vec<String>,
    /// Sequences with no matching record.
    pub unmatched: Vec<String>,
}

/// A loaded collection and its derived views.
#[derive(Debug, Clone)]
struct Collection {
    records: Vec<Record>,
    schema: FieldSchema,
    categories: CategoryUsage,
    source: Option<SourceMetadata>,
}

/// The curation engine: one loaded collection plus the rules and export
/// options being applied to it.
#[derive(Debug, Clone, Default)]
pub struct Colander {
    collection: Option<Collection>,
    rules: RuleSet,
    options: ExportOptions,
    custom_preset: Option<Vec<String>>,
}

impl Colander {
    /// Create an engine with no collection loaded.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== loading =====

    /// Load a collection from a JSON file.
    ///
    /// A fresh collection starts with every schema field selected. When
    /// the document carries embedded settings they are replayed on top,
    /// so re-opening a previous export resumes where it left off.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let (document, source) = catalog::load_file(path)?;
        self.install(document.records, Some(source.clone()));
        let replay = match document.settings {
            Some(diff) => Some(self.apply_settings(&diff, None)?),
            None => None,
        };
        Ok(LoadOutcome { source, replay })
    }

    /// Load a collection from records already in memory.
    pub fn load_records(&mut self, records: Vec<Record>) {
        self.install(records, None);
    }

    /// Replace the rules with ones rebuilt from a persisted diff.
    ///
    /// `uploaded` should be the records that traveled with the diff, when
    /// any did; they are what custom aliases are recovered from.
    pub fn apply_settings(
        &mut self,
        diff: &SettingsDiff,
        uploaded: Option<&[Record]>,
    ) -> Result<ReplaySummary> {
        let outcome = {
            let collection = self.require("apply settings")?;
            replay::replay(&collection.records, &collection.schema, diff, uploaded)
        };
        let summary = ReplaySummary {
            dropped_fields: outcome.dropped_fields,
            unresolved_identities: outcome.unresolved_identities,
        };
        self.rules = outcome.rules;
        Ok(summary)
    }

    fn install(&mut self, records: Vec<Record>, source: Option<SourceMetadata>) {
        let schema = analyze(&records);
        let categories = tally_categories(&records);
        let mut rules = RuleSet::new();
        rules.select_all(&schema);
        self.rules = rules;
        self.collection = Some(Collection {
            records,
            schema,
            categories,
            source,
        });
    }

    fn require(&self, operation: &str) -> Result<&Collection> {
        self.collection
            .as_ref()
            .ok_or_else(|| ColanderError::NoCollection(operation.to_string()))
    }

    fn parts(&mut self, operation: &str) -> Result<(&Collection, &mut RuleSet)> {
        let Self {
            collection, rules, ..
        } = self;
        match collection.as_ref() {
            Some(collection) => Ok((collection, rules)),
            None => Err(ColanderError::NoCollection(operation.to_string())),
        }
    }

    // ===== accessors =====

    /// Whether a collection is loaded.
    pub fn is_loaded(&self) -> bool {
        self.collection.is_some()
    }

    /// The loaded records, in document order.
    pub fn records(&self) -> Option<&[Record]> {
        self.collection.as_ref().map(|c| c.records.as_slice())
    }

    /// The inferred field schema.
    pub fn schema(&self) -> Option<&FieldSchema> {
        self.collection.as_ref().map(|c| &c.schema)
    }

    /// Category labels and their usage counts.
    pub fn categories(&self) -> Option<&CategoryUsage> {
        self.collection.as_ref().map(|c| &c.categories)
    }

    /// Metadata about the loaded file, when the collection came from one.
    pub fn source(&self) -> Option<&SourceMetadata> {
        self.collection.as_ref().and_then(|c| c.source.as_ref())
    }

    /// The active rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The active export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Mutable access to the export options.
    pub fn options_mut(&mut self) -> &mut ExportOptions {
        &mut self.options
    }

    // ===== field selection =====

    /// Select a field path for the output. Returns false when the schema
    /// has no such path.
    pub fn select_field(&mut self, path: &str) -> Result<bool> {
        let (collection, rules) = self.parts("select field")?;
        if collection.schema.contains(path) {
            rules.select_field(path);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Deselect a field path, cascading to its sub-fields.
    pub fn deselect_field(&mut self, path: &str) {
        self.rules.deselect_field(path);
    }

    /// Register an output rename for a field path.
    pub fn rename_field(&mut self, path: &str, new_name: &str) -> Result<()> {
        let (collection, rules) = self.parts("rename field")?;
        rules.rename_field(path, new_name, &collection.schema)
    }

    /// Drop the rename for a path. Returns whether one existed.
    pub fn clear_rename(&mut self, path: &str) -> bool {
        self.rules.clear_rename(path)
    }

    /// Apply a field preset to the selection.
    pub fn apply_preset(&mut self, preset: FieldPreset) -> Result<()> {
        let (collection, rules) = self.parts("apply preset")?;
        preset.apply(rules, &collection.schema);
        Ok(())
    }

    /// Save the current selection as the custom preset.
    pub fn save_custom_preset(&mut self) {
        self.custom_preset = Some(self.rules.selected().iter().cloned().collect());
    }

    /// Apply the saved custom preset. Returns false when none is saved.
    pub fn apply_custom_preset(&mut self) -> Result<bool> {
        let Self {
            collection,
            rules,
            custom_preset,
            ..
        } = self;
        let collection = collection
            .as_ref()
            .ok_or_else(|| ColanderError::NoCollection("apply preset".to_string()))?;
        match custom_preset {
            Some(paths) => {
                rules.set_selection(paths.iter().map(String::as_str), &collection.schema);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The saved custom preset, if any.
    pub fn custom_preset(&self) -> Option<&[String]> {
        self.custom_preset.as_deref()
    }

    /// Forget the saved custom preset.
    pub fn clear_custom_preset(&mut self) {
        self.custom_preset = None;
    }

    // ===== record removal =====

    /// Mark a record identity as removed.
    pub fn remove_identity(&mut self, identity: &str) {
        self.rules.remove_identity(identity);
    }

    /// Restore a removed identity. Returns whether it was removed.
    pub fn restore_identity(&mut self, identity: &str) -> bool {
        self.rules.restore_identity(identity)
    }

    /// Remove every record whose glyph appears in pasted text.
    ///
    /// Sequences are matched against record identities and their variant
    /// entries; a variant match removes the whole record. Sequences
    /// matching nothing are reported back rather than failing the call.
    pub fn remove_from_text(&mut self, text: &str) -> Result<TextRemoval> {
        let (collection, rules) = self.parts("remove records")?;
        let mut outcome = TextRemoval::default();
        for sequence in identity::extract_sequences(text) {
            let matches = identity::find_by_sequence(&collection.records, &sequence);
            if matches.is_empty() {
                outcome.unmatched.push(sequence);
                continue;
            }
            for index in matches {
                if let Some(id) = identity::record_identity(&collection.records[index]) {
                    if !outcome.removed.contains(&id) {
                        rules.remove_identity(&id);
                        outcome.removed.push(id);
                    }
                }
            }
        }
        if !outcome.unmatched.is_empty() {
            log::debug!("{} pasted sequences matched no record", outcome.unmatched.len());
        }
        Ok(outcome)
    }

    // ===== categories =====

    /// Fold source category labels into a bucket under a new label.
    pub fn merge_categories(&mut self, new_label: &str, sources: &[String]) -> Result<()> {
        self.rules.merge_categories(new_label, sources)
    }

    /// Rename a category label everywhere it appears.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<()> {
        let (collection, rules) = self.parts("rename category")?;
        rules.rename_category(old, new, &collection.categories)
    }

    /// Delete a remap bucket. Returns whether it existed.
    pub fn delete_remap(&mut self, label: &str) -> bool {
        self.rules.delete_remap(label)
    }

    /// Remove one source label from a bucket. Returns whether it was there.
    pub fn remove_remap_source(&mut self, bucket: &str, source: &str) -> bool {
        self.rules.remove_remap_source(bucket, source)
    }

    /// Exclude a category label from the output.
    pub fn exclude_category(&mut self, label: impl Into<String>) {
        self.rules.exclude_label(label);
    }

    /// Stop excluding a category label. Returns whether it was excluded.
    pub fn include_category(&mut self, label: &str) -> bool {
        self.rules.include_label(label)
    }

    // ===== custom aliases =====

    /// Add a custom alias term for a record identity.
    ///
    /// The term is checked against both the record's own alias list and
    /// its existing custom terms.
    pub fn add_alias(&mut self, identity: &str, term: &str) -> Result<()> {
        let (collection, rules) = self.parts("add alias")?;
        let id = crate::identity::normalize(identity);
        let own = record_for(&collection.records, &id)
            .map(catalog::alias_terms)
            .unwrap_or_default();
        rules.add_alias(&id, term, &own)
    }

    /// Remove one custom alias term. Returns whether it was present.
    pub fn remove_alias(&mut self, identity: &str, term: &str) -> bool {
        self.rules.remove_alias(identity, term)
    }

    /// Drop every custom alias term for one identity.
    pub fn clear_alias_terms(&mut self, identity: &str) {
        self.rules.set_alias_terms(identity, Vec::new());
    }

    /// Drop every custom alias term for every identity.
    pub fn clear_all_aliases(&mut self) {
        self.rules.clear_aliases();
    }

    // ===== preview & export =====

    /// The output form of one record under the current rules, or `None`
    /// when it is removed, excluded, or filtered to nothing.
    pub fn preview(&self, identity: &str) -> Result<Option<Record>> {
        let collection = self.require("preview")?;
        let id = crate::identity::normalize(identity);
        if self.rules.is_removed(&id) {
            return Ok(None);
        }
        Ok(record_for(&collection.records, &id)
            .and_then(|record| filter_record(record, &self.rules, self.options.filter_options())))
    }

    /// Assemble the export document for the loaded collection.
    pub fn export(&self) -> Result<ExportOutcome> {
        let collection = self.require("export")?;
        export::export(
            &collection.records,
            &self.rules,
            &collection.schema,
            &self.options,
        )
    }

    /// Assemble and serialize the export document to `writer`.
    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<ExportOutcome> {
        let collection = self.require("export")?;
        export::export_to_writer(
            writer,
            &collection.records,
            &self.rules,
            &collection.schema,
            &self.options,
        )
    }

    /// Assemble and serialize the export document to a file.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<ExportOutcome> {
        let collection = self.require("export")?;
        export::export_to_file(
            path.as_ref(),
            &collection.records,
            &self.rules,
            &collection.schema,
            &self.options,
        )
    }

    /// The minimal settings-diff for the current rules.
    pub fn diff(&self) -> Result<SettingsDiff> {
        let collection = self.require("diff")?;
        Ok(self.rules.diff(&collection.schema))
    }

    // ===== sessions =====

    /// Snapshot the working state into `store`.
    pub fn save_session(&self, store: &mut dyn StateStore) -> Result<()> {
        SessionState::capture(&self.rules, &self.options, self.custom_preset.clone()).save(store)
    }

    /// Restore the working state from `store`. Returns false when no
    /// snapshot is stored.
    pub fn restore_session(&mut self, store: &dyn StateStore) -> Result<bool> {
        let Some(snapshot) = SessionState::load(store)? else {
            return Ok(false);
        };
        let rules = {
            let collection = self.require("restore session")?;
            snapshot.restore_rules(&collection.schema)
        };
        self.rules = rules;
        self.options = snapshot.export_options;
        self.custom_preset = snapshot.custom_preset;
        Ok(true)
    }

    /// Return to the freshly-loaded state: default options, empty rules,
    /// full selection. The custom preset survives a reset.
    pub fn reset(&mut self) {
        self.rules.reset();
        self.options = ExportOptions::default();
        if let Some(collection) = &self.collection {
            self.rules.select_all(&collection.schema);
        }
    }
}

/// The record carrying a normalized identity; the last one wins when the
/// collection holds duplicates.
fn record_for<'a>(records: &'a [Record], id: &str) -> Option<&'a Record> {
    records
        .iter()
        .filter(|record| identity::record_identity(record).as_deref() == Some(id))
        .next_back()
}

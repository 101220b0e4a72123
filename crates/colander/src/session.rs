//! Session snapshots.
//!
//! The full working state serializes to JSON under one store key, so a
//! later run can pick up where the last one left off. Restoring is
//! schema-aware: field paths the current collection no longer has are
//! dropped silently.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ColanderError, Result};
use crate::export::ExportOptions;
use crate::rules::RuleSet;
use crate::schema::FieldSchema;
use crate::store::StateStore;

/// Store key the session snapshot lives under.
pub const SESSION_KEY: &str = "colander_session";

/// A point-in-time capture of the working state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Selected field paths, in selection order.
    #[serde(default)]
    pub selected_fields: Vec<String>,

    /// Field renames, path → output name.
    #[serde(default)]
    pub field_renames: IndexMap<String, String>,

    /// Normalized identities of removed records.
    #[serde(default)]
    pub removed_emojis: Vec<String>,

    /// Category remap buckets, label → source labels.
    #[serde(default)]
    pub category_mappings: IndexMap<String, Vec<String>>,

    /// Excluded category labels.
    #[serde(default)]
    pub excluded_categories: Vec<String>,

    /// Custom alias terms, identity → terms.
    #[serde(default)]
    pub custom_aliases: IndexMap<String, Vec<String>>,

    /// Export options in effect when the snapshot was taken.
    #[serde(default)]
    pub export_options: ExportOptions,

    /// User-defined field preset, if one was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_preset: Option<Vec<String>>,

    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

impl SessionState {
    /// Capture the current working state.
    pub fn capture(
        rules: &RuleSet,
        options: &ExportOptions,
        custom_preset: Option<Vec<String>>,
    ) -> Self {
        Self {
            selected_fields: rules.selected().iter().cloned().collect(),
            field_renames: rules.renames().clone(),
            removed_emojis: rules.removed().iter().cloned().collect(),
            category_mappings: rules.remaps().clone(),
            excluded_categories: rules.excluded().iter().cloned().collect(),
            custom_aliases: rules.custom_aliases().clone(),
            export_options: options.clone(),
            custom_preset,
            saved_at: Utc::now(),
        }
    }

    /// Rebuild a rule set from this snapshot against the current schema.
    ///
    /// Selections and renames intersect with the schema; everything else
    /// restores verbatim.
    pub fn restore_rules(&self, schema: &FieldSchema) -> RuleSet {
        let mut rules = RuleSet::new();
        for path in &self.selected_fields {
            if schema.contains(path) {
                rules.select_field(path);
            }
        }
        for (path, output) in &self.field_renames {
            if schema.contains(path) {
                rules.restore_rename(path, output);
            }
        }
        for identity in &self.removed_emojis {
            rules.remove_identity(identity);
        }
        for (label, sources) in &self.category_mappings {
            rules.restore_remap(label, sources);
        }
        for label in &self.excluded_categories {
            rules.exclude_label(label.clone());
        }
        rules.replace_aliases(self.custom_aliases.clone());
        rules
    }

    /// Serialize the snapshot into `store` under [`SESSION_KEY`].
    pub fn save(&self, store: &mut dyn StateStore) -> Result<()> {
        let payload = serde_json::to_string(self)?;
        store.set(SESSION_KEY, &payload)
    }

    /// Load the snapshot from `store`, if one was saved.
    ///
    /// A present but unreadable snapshot is a [`Persistence`] error and
    /// leaves the store untouched.
    ///
    /// [`Persistence`]: crate::ColanderError::Persistence
    pub fn load(store: &dyn StateStore) -> Result<Option<Self>> {
        let Some(payload) = store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&payload).map(Some).map_err(|e| {
            ColanderError::Persistence(format!("Corrupt session snapshot: {}", e))
        })
    }

    /// Drop the stored snapshot. Returns whether one existed.
    pub fn clear(store: &mut dyn StateStore) -> Result<bool> {
        store.remove(SESSION_KEY)
    }
}

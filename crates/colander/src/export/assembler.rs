//! Export assembly.
//!
//! Runs every record through the filter, skips removed identities, and
//! packages the result either as a plain JSON array or, when settings
//! persistence applies, as a wrapped document carrying the minimal
//! settings-diff alongside the data.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Record, DATA_KEY, SETTINGS_KEY};
use crate::error::{ColanderError, Result};
use crate::filter::{filter_record, FilterOptions};
use crate::identity;
use crate::rules::{RuleSet, SettingsDiff};
use crate::schema::FieldSchema;

/// Default name suggested for exported files.
pub const DEFAULT_FILENAME: &str = "emoji-edited.json";

/// Serialization choices for an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Pretty-print the JSON output.
    pub pretty: bool,
    /// Apply registered field renames to output names.
    pub apply_renames: bool,
    /// Keep fields whose value is null or the empty string.
    pub include_empty: bool,
    /// Embed the settings-diff in the document when it is non-empty.
    pub persist_settings: bool,
    /// Allow wrapping the data array in a settings-carrying object.
    pub wrap: bool,
    /// Suggested output filename.
    pub filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            apply_renames: true,
            include_empty: true,
            persist_settings: true,
            wrap: true,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl ExportOptions {
    /// The per-record filtering subset of these options.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            include_empty: self.include_empty,
            apply_renames: self.apply_renames,
        }
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    /// The assembled document, ready for serialization.
    pub document: Value,
    /// Records present in the document.
    pub record_count: usize,
    /// Records skipped because their identity is in the removed set.
    pub skipped_removed: usize,
    /// Records the filter reduced to nothing.
    pub skipped_empty: usize,
    /// The minimal settings-diff for this rule set.
    pub diff: SettingsDiff,
}

/// Assemble the export document for `records` under `rules`.
///
/// Records are visited in collection order. A record whose identity is in
/// the removed set is skipped before filtering. The document wraps the
/// data array together with the settings-diff only when the diff is
/// non-empty and both `persist_settings` and `wrap` are set; an
/// unmodified dataset always exports as the plain array.
pub fn export(
    records: &[Record],
    rules: &RuleSet,
    schema: &FieldSchema,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    let filter_options = options.filter_options();
    let mut rows = Vec::with_capacity(records.len());
    let mut skipped_removed = 0;
    let mut skipped_empty = 0;

    for record in records {
        if let Some(id) = identity::record_identity(record) {
            if rules.is_removed(&id) {
                skipped_removed += 1;
                continue;
            }
        }
        match filter_record(record, rules, filter_options) {
            Some(filtered) => rows.push(Value::Object(filtered)),
            None => skipped_empty += 1,
        }
    }

    if skipped_removed + skipped_empty > 0 {
        log::debug!(
            "export skipped {skipped_removed} removed and {skipped_empty} filtered-out records"
        );
    }

    let diff = rules.diff(schema);
    let record_count = rows.len();
    let document = if options.persist_settings && options.wrap && !diff.is_empty() {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(DATA_KEY.to_string(), Value::Array(rows));
        wrapper.insert(SETTINGS_KEY.to_string(), serde_json::to_value(&diff)?);
        Value::Object(wrapper)
    } else {
        Value::Array(rows)
    };

    Ok(ExportOutcome {
        document,
        record_count,
        skipped_removed,
        skipped_empty,
        diff,
    })
}

/// Assemble and serialize the export document to `writer`.
pub fn export_to_writer<W: Write>(
    writer: W,
    records: &[Record],
    rules: &RuleSet,
    schema: &FieldSchema,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    let outcome = export(records, rules, schema, options)?;
    if options.pretty {
        serde_json::to_writer_pretty(writer, &outcome.document)?;
    } else {
        serde_json::to_writer(writer, &outcome.document)?;
    }
    Ok(outcome)
}

/// Assemble and serialize the export document to a file at `path`.
pub fn export_to_file(
    path: &Path,
    records: &[Record],
    rules: &RuleSet,
    schema: &FieldSchema,
    options: &ExportOptions,
) -> Result<ExportOutcome> {
    let file = File::create(path).map_err(|source| ColanderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let outcome = export_to_writer(&mut writer, records, rules, schema, options)?;
    writer.flush().map_err(|source| ColanderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("exported {} records to {}", outcome.record_count, path.display());
    Ok(outcome)
}

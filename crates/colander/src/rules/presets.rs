//! Named field-selection presets.

use serde::{Deserialize, Serialize};

use crate::schema::FieldSchema;
use super::ruleset::RuleSet;

/// Core display fields: name, aliases, category, sorting, identity.
const MINIMAL_FIELDS: &[&str] = &["name", "short_names", "category", "sort_order", "unified"];

/// The minimal set plus image data and platform support flags.
const ESSENTIAL_FIELDS: &[&str] = &[
    "unified",
    "category",
    "name",
    "short_name",
    "short_names",
    "skin_variations",
    "sort_order",
    "subcategory",
    "has_img_apple",
    "has_img_google",
    "has_img_twitter",
    "has_img_facebook",
    "image",
    "sheet_x",
    "sheet_y",
];

/// A named bundle of field paths to select in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPreset {
    /// Core essentials for basic displays.
    Minimal,
    /// Minimal plus image data and platform support.
    Essential,
    /// Every field the schema discovered.
    Complete,
}

impl FieldPreset {
    /// The preset's field paths, `None` for [`FieldPreset::Complete`]
    /// which tracks the live schema instead of a fixed list.
    pub fn fields(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldPreset::Minimal => Some(MINIMAL_FIELDS),
            FieldPreset::Essential => Some(ESSENTIAL_FIELDS),
            FieldPreset::Complete => None,
        }
    }

    /// Replace the rule set's selection with this preset, intersected
    /// with the live schema. Paths the collection does not have are
    /// skipped; selecting the variant group also selects its sub-fields.
    pub fn apply(&self, rules: &mut RuleSet, schema: &FieldSchema) {
        match self.fields() {
            None => rules.select_all(schema),
            Some(fields) => {
                rules.clear_selection();
                for field in fields {
                    if schema.contains(field) {
                        rules.select_field(field);
                        for sub in schema.sub_paths_of(field) {
                            rules.select_field(sub);
                        }
                    }
                }
            }
        }
    }
}

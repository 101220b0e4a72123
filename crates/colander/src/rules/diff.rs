//! The minimal settings diff persisted alongside exports.

use serde::{Deserialize, Serialize};

/// Wire form of the changes a curation session made, relative to
/// "select everything, rename nothing, remove nothing".
///
/// Every key is optional. An absent key means "no change in that
/// category", not "reset to empty", so a diff survives being merged over
/// an older one without clobbering unrelated state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsDiff {
    /// Field paths deselected from the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields_removed: Option<Vec<String>>,

    /// Identities of removed records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_emojis: Option<Vec<String>>,

    /// Category remaps as `[new label, [source labels...]]` pairs, in
    /// bucket insertion order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_mappings: Option<Vec<(String, Vec<String>)>>,

    /// Excluded category labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_categories: Option<Vec<String>>,
}

impl SettingsDiff {
    /// True when every change category is absent or empty. An empty diff
    /// is never attached to an export.
    pub fn is_empty(&self) -> bool {
        fn blank<T>(field: &Option<Vec<T>>) -> bool {
            field.as_ref().is_none_or(|v| v.is_empty())
        }

        blank(&self.fields_removed)
            && blank(&self.removed_emojis)
            && blank(&self.category_mappings)
            && blank(&self.excluded_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_diff_is_empty() {
        assert!(SettingsDiff::default().is_empty());
    }

    #[test]
    fn test_present_but_empty_lists_still_count_as_empty() {
        let diff = SettingsDiff {
            fields_removed: Some(vec![]),
            removed_emojis: Some(vec![]),
            ..Default::default()
        };
        assert!(diff.is_empty());
    }

    #[test]
    fn test_serializes_only_populated_keys() {
        let diff = SettingsDiff {
            fields_removed: Some(vec!["obsoleted_by".to_string()]),
            removed_emojis: None,
            category_mappings: Some(vec![(
                "Faces".to_string(),
                vec!["Smileys & Emotion".to_string()],
            )]),
            excluded_categories: None,
        };

        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(
            value,
            json!({
                "fieldsRemoved": ["obsoleted_by"],
                "categoryMappings": [["Faces", ["Smileys & Emotion"]]],
            })
        );
    }

    #[test]
    fn test_absent_keys_deserialize_as_none() {
        let diff: SettingsDiff =
            serde_json::from_value(json!({ "removedEmojis": ["1F4A9"] })).unwrap();

        assert_eq!(diff.removed_emojis, Some(vec!["1F4A9".to_string()]));
        assert_eq!(diff.fields_removed, None);
        assert_eq!(diff.category_mappings, None);
        assert_eq!(diff.excluded_categories, None);
        assert!(!diff.is_empty());
    }
}

//! Category tallying over a record collection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Record, UNKNOWN_CATEGORY};

/// Record counts per original categorical label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Label → number of records.
    pub counts: IndexMap<String, usize>,
}

impl CategoryUsage {
    /// All original labels in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Record count for a label, zero when unseen.
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Whether the label appeared in the collection.
    pub fn contains(&self, label: &str) -> bool {
        self.counts.contains_key(label)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no records were tallied.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count records per raw category label. Records without a string label
/// are tallied under [`UNKNOWN_CATEGORY`].
pub fn tally_categories(records: &[Record]) -> CategoryUsage {
    let mut usage = CategoryUsage::default();
    for record in records {
        let label = catalog::category_label(record).unwrap_or(UNKNOWN_CATEGORY);
        *usage.counts.entry(label.to_string()).or_insert(0) += 1;
    }
    usage
}

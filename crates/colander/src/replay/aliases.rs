//! Custom alias recovery.
//!
//! Exported alias lists carry a record's own terms with any custom terms
//! merged in, so the custom portion is recoverable by comparing an
//! exported record against its canonical counterpart.

use indexmap::IndexMap;

use crate::catalog::{self, Record};
use crate::identity;

/// Records the detector could not use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectStats {
    /// Working records with no resolvable identity.
    pub no_identity: usize,
    /// Working records with no canonical counterpart.
    pub no_counterpart: usize,
}

/// Recover custom alias terms by diffing `working` records against their
/// `canonical` counterparts.
///
/// Counterparts are matched by normalized identity; when the canonical
/// set holds duplicate identities, the last record wins. A working
/// record's custom terms are the alias strings absent from its
/// counterpart's list, compared by exact string equality and kept in
/// working-list order. Identities with no extra terms are not stored.
pub fn detect(
    working: &[Record],
    canonical: &[Record],
) -> (IndexMap<String, Vec<String>>, DetectStats) {
    let mut by_identity: IndexMap<String, &Record> = IndexMap::new();
    for record in canonical {
        if let Some(id) = identity::record_identity(record) {
            by_identity.insert(id, record);
        }
    }

    let mut custom: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut stats = DetectStats::default();

    for record in working {
        let Some(id) = identity::record_identity(record) else {
            stats.no_identity += 1;
            continue;
        };
        let Some(counterpart) = by_identity.get(&id) else {
            stats.no_counterpart += 1;
            continue;
        };
        let known = catalog::alias_terms(counterpart);
        let extras: Vec<String> = catalog::alias_terms(record)
            .into_iter()
            .filter(|term| !known.contains(term))
            .collect();
        if !extras.is_empty() {
            custom.insert(id, extras);
        }
    }

    if stats.no_identity + stats.no_counterpart > 0 {
        log::debug!(
            "alias detection skipped {} records without identity and {} without counterpart",
            stats.no_identity,
            stats.no_counterpart
        );
    }

    (custom, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<Record> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => map,
                    _ => panic!("test records must be objects"),
                })
                .collect(),
            _ => panic!("test fixture must be an array"),
        }
    }

    #[test]
    fn test_identical_sets_detect_nothing() {
        let base = records(json!([
            { "unified": "1F600", "short_names": ["grinning"] },
            { "unified": "1F44D", "short_names": ["thumbsup", "+1"] },
        ]));

        let (custom, stats) = detect(&base, &base);
        assert!(custom.is_empty());
        assert_eq!(stats, DetectStats::default());
    }

    #[test]
    fn test_extra_terms_recovered_in_order() {
        let canonical = records(json!([
            { "unified": "1F44D", "short_names": ["thumbsup", "+1"] },
        ]));
        let working = records(json!([
            { "unified": "1f44d", "short_names": ["thumbsup", "yes", "+1", "approve"] },
        ]));

        let (custom, _) = detect(&working, &canonical);
        assert_eq!(custom.get("1F44D"), Some(&vec!["yes".to_string(), "approve".to_string()]));
    }

    #[test]
    fn test_unusable_records_are_counted_not_stored() {
        let canonical = records(json!([
            { "unified": "1F600", "short_names": ["grinning"] },
        ]));
        let working = records(json!([
            { "name": "no identity", "short_names": ["ghost"] },
            { "unified": "1F9EA", "short_names": ["beaker"] },
            { "unified": "1F600", "short_names": ["grinning"] },
        ]));

        let (custom, stats) = detect(&working, &canonical);
        assert!(custom.is_empty());
        assert_eq!(stats.no_identity, 1);
        assert_eq!(stats.no_counterpart, 1);
    }

    #[test]
    fn test_duplicate_canonical_identity_last_record_wins() {
        let canonical = records(json!([
            { "unified": "1F600", "short_names": ["old"] },
            { "unified": "1F600", "short_names": ["grinning"] },
        ]));
        let working = records(json!([
            { "unified": "1F600", "short_names": ["grinning", "old"] },
        ]));

        let (custom, _) = detect(&working, &canonical);
        assert_eq!(custom.get("1F600"), Some(&vec!["old".to_string()]));
    }

    #[test]
    fn test_non_string_terms_are_ignored() {
        let canonical = records(json!([
            { "unified": "1F600", "short_names": ["grinning"] },
        ]));
        let working = records(json!([
            { "unified": "1F600", "short_names": ["grinning", 42, "happy"] },
        ]));

        let (custom, _) = detect(&working, &canonical);
        assert_eq!(custom.get("1F600"), Some(&vec!["happy".to_string()]));
    }
}

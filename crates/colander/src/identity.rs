//! Codepoint identity handling for catalog records.
//!
//! Records are referenced by their canonical codepoint string (the
//! `unified` field, e.g. `"1F600"` or `"1F469-200D-2764-FE0F-200D-1F468"`)
//! rather than by array position, so removals and custom aliases survive a
//! reload of the base collection. Identities are normalized to uppercase
//! hex with per-segment leading zeros stripped before any comparison.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{self, Record, IDENTITY_FIELD, VARIANT_FIELD};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Glyph sequences compiled once on first use.

static GLYPH_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\u{1F1E6}-\u{1F1FF}]{2}",                                    // flag pair
        r"|[0-9#*]\u{FE0F}?\u{20E3}",                                   // keycap
        r"|\p{Extended_Pictographic}(?:\u{FE0F}|[\u{1F3FB}-\u{1F3FF}])?",
        r"(?:\u{200D}\p{Extended_Pictographic}(?:\u{FE0F}|[\u{1F3FB}-\u{1F3FF}])?)*",
    ))
    .unwrap()
});

/// Normalize a codepoint string for comparison: uppercase hex with leading
/// zeros stripped from every dash-separated segment.
pub fn normalize(sequence: &str) -> String {
    sequence
        .split('-')
        .map(|segment| {
            let trimmed = segment.trim_start_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_uppercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// The record's normalized identity, if it carries one.
pub fn record_identity(record: &Record) -> Option<String> {
    catalog::identity_value(record).map(normalize)
}

/// Decode a codepoint string into its displayable glyph.
///
/// Returns `None` for degenerate input: empty strings, non-hex segments,
/// or codepoints outside the Unicode scalar range.
pub fn decode_glyph(sequence: &str) -> Option<String> {
    if sequence.is_empty() {
        return None;
    }
    sequence
        .split('-')
        .map(|segment| {
            u32::from_str_radix(segment, 16)
                .ok()
                .and_then(char::from_u32)
        })
        .collect()
}

/// Encode a glyph back into its normalized codepoint string.
pub fn encode_glyph(glyph: &str) -> String {
    glyph
        .chars()
        .map(|c| format!("{:X}", c as u32))
        .collect::<Vec<_>>()
        .join("-")
}

/// A human-displayable handle for the record: the decoded glyph, falling
/// back to the display name, then to a placeholder. Never fails.
pub fn display_glyph(record: &Record) -> String {
    if let Some(glyph) = catalog::identity_value(record).and_then(decode_glyph) {
        return glyph;
    }
    if let Some(name) = catalog::display_name(record) {
        return name.to_string();
    }
    match catalog::identity_value(record) {
        Some(raw) => format!("U+{raw}"),
        None => "(unnamed)".to_string(),
    }
}

/// Extract the glyph sequences found in free text as normalized codepoint
/// strings, de-duplicated in first-seen order.
pub fn extract_sequences(text: &str) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    for m in GLYPH_SEQUENCE.find_iter(text) {
        seen.insert(encode_glyph(m.as_str()));
    }
    seen.into_iter().collect()
}

/// Indices of the records matching a codepoint sequence, checking both the
/// record's own identity and the identities of its variant entries.
pub fn find_by_sequence(records: &[Record], sequence: &str) -> Vec<usize> {
    let target = normalize(sequence);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            if record_identity(record).as_deref() == Some(target.as_str()) {
                return true;
            }
            variant_identities(record).any(|v| normalize(v) == target)
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn variant_identities(record: &Record) -> impl Iterator<Item = &str> {
    record
        .get(VARIANT_FIELD)
        .and_then(serde_json::Value::as_object)
        .into_iter()
        .flat_map(|variants| {
            variants
                .values()
                .filter_map(|v| v.get(IDENTITY_FIELD))
                .filter_map(serde_json::Value::as_str)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_normalize_strips_leading_zeros_per_segment() {
        assert_eq!(normalize("00a9"), "A9");
        assert_eq!(normalize("1f600"), "1F600");
        assert_eq!(normalize("00A9-FE0F"), "A9-FE0F");
        assert_eq!(normalize("0023-FE0F-20E3"), "23-FE0F-20E3");
        assert_eq!(normalize("0000"), "0");
    }

    #[test]
    fn test_decode_single_and_joined_sequences() {
        assert_eq!(decode_glyph("1F600").as_deref(), Some("\u{1F600}"));
        assert_eq!(
            decode_glyph("1F468-200D-1F469-200D-1F466").as_deref(),
            Some("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}")
        );
    }

    #[test]
    fn test_decode_rejects_degenerate_input() {
        assert_eq!(decode_glyph(""), None);
        assert_eq!(decode_glyph("ZZZZ"), None);
        assert_eq!(decode_glyph("110000"), None);
        assert_eq!(decode_glyph("1F600-"), None);
    }

    #[test]
    fn test_encode_round_trips_through_decode() {
        for seq in ["1F600", "1F44D-1F3FD", "1F1FA-1F1F8"] {
            let glyph = decode_glyph(seq).expect("decodable");
            assert_eq!(encode_glyph(&glyph), seq);
        }
    }

    #[test]
    fn test_display_glyph_fallback_chain() {
        let rec = record(json!({ "unified": "1F600", "name": "GRINNING FACE" }));
        assert_eq!(display_glyph(&rec), "\u{1F600}");

        let rec = record(json!({ "unified": "not-hex", "name": "MYSTERY" }));
        assert_eq!(display_glyph(&rec), "MYSTERY");

        let rec = record(json!({ "unified": "not-hex" }));
        assert_eq!(display_glyph(&rec), "U+not-hex");

        let rec = record(json!({ "sort_order": 1 }));
        assert_eq!(display_glyph(&rec), "(unnamed)");
    }

    #[test]
    fn test_extract_sequences_dedupes_in_first_seen_order() {
        let text = "ok \u{1F600} then \u{1F44D}\u{1F3FD} and \u{1F600} again";
        assert_eq!(extract_sequences(text), vec!["1F600", "1F44D-1F3FD"]);
    }

    #[test]
    fn test_extract_sequences_handles_flags_and_zwj() {
        let text = "\u{1F1FA}\u{1F1F8} \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}";
        assert_eq!(
            extract_sequences(text),
            vec!["1F1FA-1F1F8", "1F468-200D-1F469-200D-1F466"]
        );
    }

    #[test]
    fn test_find_by_sequence_matches_variant_identities() {
        let records = vec![
            record(json!({ "unified": "1F600" })),
            record(json!({
                "unified": "1F44D",
                "skin_variations": {
                    "1F3FD": { "unified": "1F44D-1F3FD" }
                }
            })),
        ];

        assert_eq!(find_by_sequence(&records, "1F600"), vec![0]);
        assert_eq!(find_by_sequence(&records, "1f44d-1f3fd"), vec![1]);
        assert!(find_by_sequence(&records, "1F4A9").is_empty());
    }
}

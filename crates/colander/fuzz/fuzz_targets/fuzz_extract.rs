//! Fuzz target for glyph extraction from pasted text.
//!
//! This fuzzer tests that sequence extraction:
//! 1. Never panics on any UTF-8 input
//! 2. Produces only decodable, duplicate-free sequences
//! 3. Matches against record collections without crashing

#![no_main]

use libfuzzer_sys::fuzz_target;
use colander::catalog::Record;
use colander::identity::{decode_glyph, extract_sequences, find_by_sequence};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    let sequences = extract_sequences(&text);

    let mut records: Vec<Record> = Vec::new();
    for sequence in &sequences {
        // Every extracted sequence came from real glyphs
        assert!(decode_glyph(sequence).is_some());

        let mut record = Record::new();
        record.insert(
            "unified".to_string(),
            serde_json::Value::String(sequence.clone()),
        );
        records.push(record);
    }

    // Each sequence must find the record built from it
    for sequence in &sequences {
        assert!(!find_by_sequence(&records, sequence).is_empty());
    }
});

//! Example: Curate an emoji catalog file with Colander.
//!
//! Usage:
//!   cargo run --example curate -- <file_path>
//!
//! Example:
//!   cargo run --example curate -- emoji_pretty.json

use std::env;
use std::path::Path;

use colander::{Colander, FieldPreset};

fn main() -> colander::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example curate -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example curate -- emoji_pretty.json");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Colander Curation: {}", file_path);
    println!("{}", separator);
    println!();

    let mut engine = Colander::new();
    let outcome = engine.load_file(path)?;

    // Print source metadata
    println!("## Source Metadata");
    println!("  File: {}", outcome.source.file);
    println!("  Shape: {}", outcome.source.shape);
    println!("  Records: {}", outcome.source.record_count);
    println!("  Size: {} bytes", outcome.source.size_bytes);
    if let Some(replay) = &outcome.replay {
        println!(
            "  Embedded settings applied: {} stale fields, {} unresolved removals",
            replay.dropped_fields, replay.unresolved_identities
        );
    }
    println!();

    // Print schema summary
    if let Some(schema) = engine.schema() {
        println!("## Schema ({} field paths)", schema.len());
        println!();
        for (field_path, info) in &schema.fields {
            let mut notes = Vec::new();
            if info.has_null {
                notes.push("null");
            }
            if info.has_empty_string {
                notes.push("empty");
            }
            let notes = if notes.is_empty() {
                String::new()
            } else {
                format!("  [{}]", notes.join(", "))
            };
            let indent = if info.is_sub_field { "    " } else { "  " };
            println!(
                "{}{:<30} {:<8} used by {:>5}{}",
                indent,
                field_path,
                info.kind.as_str(),
                info.usage,
                notes
            );
        }
        println!();
    }

    // Print category usage
    if let Some(categories) = engine.categories() {
        println!("## Categories ({})", categories.len());
        println!();
        for (label, count) in &categories.counts {
            println!("  {:<30} {:>6}", label, count);
        }
        println!();
    }

    // Apply a sample curation: the essential preset and one exclusion
    println!("## Curation");
    engine.apply_preset(FieldPreset::Essential)?;
    println!(
        "  Applied the essential preset, {} field paths selected",
        engine.rules().selected().len()
    );
    engine.exclude_category("Component");
    println!("  Excluded the 'Component' category");
    println!();

    // Preview the first record under the current rules
    let first_identity = engine
        .records()
        .and_then(|records| records.first())
        .and_then(colander::identity::record_identity);
    if let Some(id) = first_identity {
        println!("## Preview ({})", id);
        match engine.preview(&id)? {
            Some(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            None => println!("  (filtered out)"),
        }
        println!();
    }

    // Assemble the export in memory and report what it would contain
    let export = engine.export()?;
    println!("## Export");
    println!("  Records: {}", export.record_count);
    println!("  Skipped as removed: {}", export.skipped_removed);
    println!("  Skipped by filters: {}", export.skipped_empty);
    if export.diff.is_empty() {
        println!("  Settings diff: (no changes)");
    } else {
        println!("  Settings diff:");
        println!("{}", serde_json::to_string_pretty(&export.diff)?);
    }
    println!();

    println!("{}", separator);

    Ok(())
}

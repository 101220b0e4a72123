//! Inspect command - source metadata, field schema, and categories.

use std::path::PathBuf;

use colander::Colander;
use colored::Colorize;

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Colander::new();
    let outcome = engine.load_file(&file)?;

    let schema = engine.schema().ok_or("collection failed to load")?;
    let categories = engine.categories().ok_or("collection failed to load")?;

    if json_output {
        let status = serde_json::json!({
            "source": outcome.source,
            "fields": &schema.fields,
            "categories": &categories.counts,
            "embedded_settings_applied": outcome.replay.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Catalog".cyan().bold(),
        outcome.source.file.white()
    );
    println!(
        "  {} records, {} shape, {} bytes",
        outcome.source.record_count.to_string().white().bold(),
        outcome.source.shape,
        outcome.source.size_bytes
    );
    println!("  {}", outcome.source.hash.dimmed());
    if let Some(replay) = outcome.replay {
        println!(
            "  {} ({} stale fields, {} unresolved identities)",
            "Embedded settings applied".yellow(),
            replay.dropped_fields,
            replay.unresolved_identities
        );
    }
    println!();

    println!("{} ({})", "Fields:".yellow().bold(), schema.len());
    for (path, info) in &schema.fields {
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
            format!(" [{}]", notes.join(", "))
        };

        let examples: Vec<String> = info
            .examples
            .iter()
            .map(|value| value.to_string())
            .collect();
        let mut preview = examples.join(", ");
        if preview.len() > 48 {
            let cut = (0..=45)
                .rev()
                .find(|&i| preview.is_char_boundary(i))
                .unwrap_or(0);
            preview.truncate(cut);
            preview.push_str("...");
        }

        let indent = if info.is_sub_field { "    " } else { "  " };
        println!(
            "{}{} {} {:>6}{}  {}",
            indent,
            format!("{:<30}", path).white(),
            format!("{:<8}", info.kind.as_str()).cyan(),
            info.usage,
            notes.red(),
            preview.dimmed()
        );
    }
    println!();

    println!("{} ({})", "Categories:".yellow().bold(), categories.len());
    for (label, count) in &categories.counts {
        println!("  {} {:>6}", format!("{:<30}", label).white(), count);
    }

    Ok(())
}

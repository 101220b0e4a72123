//! Replay command - re-apply embedded settings to a fresh catalog.

use std::path::PathBuf;

use colander::{catalog, Colander};
use colored::Colorize;

pub fn run(
    base: PathBuf,
    edited: PathBuf,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Colander::new();
    engine.load_file(&base)?;

    let (document, _) = catalog::load_file(&edited)?;
    let Some(settings) = document.settings else {
        return Err(format!("'{}' carries no embedded settings", edited.display()).into());
    };

    let summary = engine.apply_settings(&settings, Some(&document.records))?;

    println!(
        "{} {}",
        "Replayed settings from".cyan().bold(),
        edited.display().to_string().white()
    );
    let rules = engine.rules();
    println!("  Selected fields:  {}", rules.selected().len());
    println!("  Removed records:  {}", rules.removed().len());
    println!("  Category buckets: {}", rules.remaps().len());
    println!("  Excluded labels:  {}", rules.excluded().len());
    println!("  Custom aliases:   {}", rules.custom_aliases().len());
    if summary.dropped_fields > 0 {
        println!(
            "  {}",
            format!("{} stale field paths dropped", summary.dropped_fields).yellow()
        );
    }
    if summary.unresolved_identities > 0 {
        println!(
            "  {}",
            format!(
                "{} removed identities matched no record",
                summary.unresolved_identities
            )
            .yellow()
        );
    }

    if let Some(path) = output {
        let outcome = engine.export_to_file(&path)?;
        println!(
            "{} {} ({} records)",
            "Exported".green().bold(),
            path.display().to_string().white(),
            outcome.record_count
        );
    }

    Ok(())
}

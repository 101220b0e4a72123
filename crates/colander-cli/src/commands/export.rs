//! Export command - apply curation rules and write the filtered catalog.

use std::path::PathBuf;

use colander::{Colander, SettingsDiff};
use colored::Colorize;

use crate::cli::ExportArgs;

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Colander::new();
    engine.load_file(&args.file)?;

    if let Some(choice) = &args.preset {
        engine.apply_preset(choice.to_preset())?;
    }
    for path in &args.drop_fields {
        engine.deselect_field(path);
    }
    for pair in &args.renames {
        let (path, name) = split_pair(pair, "--rename")?;
        engine.rename_field(path, name)?;
    }
    for identity in &args.removals {
        engine.remove_identity(identity);
    }
    if let Some(text) = &args.remove_text {
        let removal = engine.remove_from_text(text)?;
        println!(
            "{} {} records removed, {} sequences unmatched",
            "Pasted text:".yellow().bold(),
            removal.removed.len(),
            removal.unmatched.len()
        );
    }
    for spec in &args.merges {
        let (label, sources) = split_pair(spec, "--merge")?;
        let sources: Vec<String> = sources
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        engine.merge_categories(label, &sources)?;
    }
    for pair in &args.category_renames {
        let (old, new) = split_pair(pair, "--rename-category")?;
        engine.rename_category(old, new)?;
    }
    for label in &args.excludes {
        engine.exclude_category(label.clone());
    }
    for pair in &args.aliases {
        let (identity, term) = split_pair(pair, "--alias")?;
        engine.add_alias(identity, term)?;
    }

    {
        let options = engine.options_mut();
        options.pretty = !args.compact;
        options.include_empty = !args.skip_empty;
        options.apply_renames = !args.no_renames;
        options.persist_settings = !args.no_settings;
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&engine.options().filename));
    let outcome = engine.export_to_file(&output)?;

    println!(
        "{} {}",
        "Exported".green().bold(),
        output.display().to_string().white()
    );
    println!("  Records:  {}", outcome.record_count.to_string().white());
    if outcome.skipped_removed > 0 {
        println!("  Removed:  {}", outcome.skipped_removed.to_string().red());
    }
    if outcome.skipped_empty > 0 {
        println!("  Filtered: {}", outcome.skipped_empty.to_string().yellow());
    }
    if outcome.diff.is_empty() {
        println!("  Settings: {}", "unchanged".dimmed());
    } else {
        println!("  Settings: {}", summarize_diff(&outcome.diff).cyan());
    }

    Ok(())
}

fn split_pair<'a>(
    spec: &'a str,
    flag: &str,
) -> Result<(&'a str, &'a str), Box<dyn std::error::Error>> {
    spec.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| format!("{} expects KEY=VALUE, got '{}'", flag, spec).into())
}

fn summarize_diff(diff: &SettingsDiff) -> String {
    let mut parts = Vec::new();
    if let Some(fields) = &diff.fields_removed {
        parts.push(format!("{} fields removed", fields.len()));
    }
    if let Some(removed) = &diff.removed_emojis {
        parts.push(format!("{} records removed", removed.len()));
    }
    if let Some(mappings) = &diff.category_mappings {
        parts.push(format!("{} category mappings", mappings.len()));
    }
    if let Some(excluded) = &diff.excluded_categories {
        parts.push(format!("{} categories excluded", excluded.len()));
    }
    parts.join(", ")
}

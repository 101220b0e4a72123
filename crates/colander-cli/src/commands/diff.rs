//! Diff command - show the settings-diff embedded in an exported file,
//! or detect custom aliases against a canonical base.

use std::path::PathBuf;

use colander::catalog;
use colander::replay::detect;
use colored::Colorize;

pub fn run(
    file: PathBuf,
    base: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (document, _) = catalog::load_file(&file)?;

    if let Some(base) = base {
        let (canonical, _) = catalog::load_file(&base)?;
        let (custom, stats) = detect(&document.records, &canonical.records);

        if json_output {
            println!("{}", serde_json::to_string_pretty(&custom)?);
            return Ok(());
        }

        if custom.is_empty() {
            println!("{}", "No custom aliases detected.".yellow());
        } else {
            println!(
                "{} ({} records)",
                "Custom aliases:".yellow().bold(),
                custom.len()
            );
            for (identity, terms) in &custom {
                println!("  {} {}", identity.cyan(), terms.join(", "));
            }
        }
        if stats.no_identity > 0 {
            println!("  {} records carry no identity", stats.no_identity);
        }
        if stats.no_counterpart > 0 {
            println!(
                "  {} records have no counterpart in the base",
                stats.no_counterpart
            );
        }
        return Ok(());
    }

    let Some(settings) = document.settings else {
        println!("{}", "No settings are embedded in this file.".yellow());
        return Ok(());
    };
    if settings.is_empty() {
        println!("{}", "Embedded settings record no changes.".yellow());
        return Ok(());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    if let Some(fields) = &settings.fields_removed {
        println!("{} ({})", "Fields removed:".yellow().bold(), fields.len());
        for path in fields {
            println!("  {}", path);
        }
        println!();
    }
    if let Some(removed) = &settings.removed_emojis {
        println!("{} ({})", "Removed records:".yellow().bold(), removed.len());
        for identity in removed {
            println!("  {}", identity);
        }
        println!();
    }
    if let Some(mappings) = &settings.category_mappings {
        println!(
            "{} ({})",
            "Category mappings:".yellow().bold(),
            mappings.len()
        );
        for (label, sources) in mappings {
            println!("  {} <- {}", label.cyan(), sources.join(", "));
        }
        println!();
    }
    if let Some(excluded) = &settings.excluded_categories {
        println!(
            "{} ({})",
            "Excluded categories:".yellow().bold(),
            excluded.len()
        );
        for label in excluded {
            println!("  {}", label);
        }
    }

    Ok(())
}

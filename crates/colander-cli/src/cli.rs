//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use colander::FieldPreset;
use std::path::PathBuf;

/// Colander: emoji catalog curation tool
#[derive(Parser)]
#[command(name = "colander")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect a catalog file: source metadata, field schema, categories
    Inspect {
        /// Path to the catalog file (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply curation rules and export the filtered catalog
    Export(ExportArgs),

    /// Re-apply the settings embedded in an edited export to a fresh catalog
    Replay {
        /// Path to the pristine catalog file
        #[arg(value_name = "BASE")]
        base: PathBuf,

        /// Path to the edited export carrying embedded settings
        #[arg(value_name = "EDITED")]
        edited: PathBuf,

        /// Write the re-applied export here (default: summary only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the settings-diff embedded in an exported file, or detect
    /// custom aliases against a canonical base
    Diff {
        /// Path to the exported (working) file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Canonical catalog to diff alias lists against
        #[arg(short, long, value_name = "FILE")]
        base: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Path to the catalog file (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path (default: emoji-edited.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Start from a field preset
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<PresetChoice>,

    /// Drop a field path from the output (repeatable)
    #[arg(long = "drop-field", value_name = "PATH")]
    pub drop_fields: Vec<String>,

    /// Rename a field, as path=new_name (repeatable)
    #[arg(long = "rename", value_name = "PATH=NAME")]
    pub renames: Vec<String>,

    /// Remove a record by codepoint identity (repeatable)
    #[arg(long = "remove", value_name = "IDENTITY")]
    pub removals: Vec<String>,

    /// Remove every record whose glyph appears in this text
    #[arg(long = "remove-text", value_name = "TEXT")]
    pub remove_text: Option<String>,

    /// Merge categories into a bucket, as Label=Source,Source (repeatable)
    #[arg(long = "merge", value_name = "LABEL=SOURCES")]
    pub merges: Vec<String>,

    /// Rename a category, as old=new (repeatable)
    #[arg(long = "rename-category", value_name = "OLD=NEW")]
    pub category_renames: Vec<String>,

    /// Exclude a category label from the output (repeatable)
    #[arg(long = "exclude", value_name = "LABEL")]
    pub excludes: Vec<String>,

    /// Add a custom search alias, as identity=term (repeatable)
    #[arg(long = "alias", value_name = "IDENTITY=TERM")]
    pub aliases: Vec<String>,

    /// Compact JSON output instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Drop fields whose value is null or the empty string
    #[arg(long = "skip-empty")]
    pub skip_empty: bool,

    /// Keep original field names, ignoring renames
    #[arg(long = "no-renames")]
    pub no_renames: bool,

    /// Never embed settings in the exported document
    #[arg(long = "no-settings")]
    pub no_settings: bool,
}

/// Field preset choice for export
#[derive(Clone, Debug)]
pub enum PresetChoice {
    /// Identity, name, glyph basics only
    Minimal,
    /// The fields most consumers need
    Essential,
    /// Every field in the schema
    Complete,
}

impl PresetChoice {
    pub fn to_preset(&self) -> FieldPreset {
        match self {
            PresetChoice::Minimal => FieldPreset::Minimal,
            PresetChoice::Essential => FieldPreset::Essential,
            PresetChoice::Complete => FieldPreset::Complete,
        }
    }
}

impl std::str::FromStr for PresetChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" | "min" => Ok(PresetChoice::Minimal),
            "essential" => Ok(PresetChoice::Essential),
            "complete" | "all" => Ok(PresetChoice::Complete),
            _ => Err(format!(
                "Unknown preset: {}. Use minimal, essential, or complete.",
                s
            )),
        }
    }
}

impl std::fmt::Display for PresetChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetChoice::Minimal => write!(f, "minimal"),
            PresetChoice::Essential => write!(f, "essential"),
            PresetChoice::Complete => write!(f, "complete"),
        }
    }
}

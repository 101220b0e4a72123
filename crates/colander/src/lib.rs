//! Colander: a curation engine for emoji catalog datasets.
//!
//! Colander loads a JSON emoji catalog, infers its field schema, and lets
//! a curator strain the dataset down: pick fields, rename them, remove
//! records, merge and exclude categories, and attach custom search
//! aliases. Exports carry a minimal settings-diff so an edited file can
//! be re-opened later and continue where it left off.
//!
//! # Core Principles
//!
//! - **Non-destructive**: the loaded records are never modified; every
//!   export is computed from the originals plus the current rules
//! - **Deterministic**: the same collection and rules always produce the
//!   same output, byte for byte
//! - **Replayable**: a persisted settings-diff rebuilds the same rules
//!   against a fresh copy of the data
//!
//! # Example
//!
//! ```no_run
//! use colander::Colander;
//!
//! let mut engine = Colander::new();
//! engine.load_file("emoji.json").unwrap();
//!
//! engine.deselect_field("sheet_x");
//! engine.remove_identity("1F4A9");
//!
//! let outcome = engine.export_to_file("emoji-edited.json").unwrap();
//! println!("Exported {} records", outcome.record_count);
//! ```

pub mod catalog;
pub mod error;
pub mod export;
pub mod filter;
pub mod identity;
pub mod replay;
pub mod rules;
pub mod schema;
pub mod session;
pub mod store;

mod colander;

pub use crate::colander::{Colander, LoadOutcome, ReplaySummary, TextRemoval};
pub use catalog::{DocumentShape, LoadedDocument, Record, SourceMetadata};
pub use error::{ColanderError, Result};
pub use export::{ExportOptions, ExportOutcome};
pub use filter::FilterOptions;
pub use rules::{FieldPreset, RuleSet, SettingsDiff};
pub use schema::{CategoryUsage, FieldInfo, FieldKind, FieldSchema};
pub use session::SessionState;
pub use store::{FileStore, MemoryStore, StateStore};

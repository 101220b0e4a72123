//! Catalog loading and record-shape conventions.

mod loader;
mod record;

pub use loader::{load_file, parse_document, DocumentShape, LoadedDocument, SourceMetadata};
pub use record::{
    alias_terms, category_label, display_name, identity_value, Record, ALIAS_FIELD,
    CATEGORY_FIELD, DATA_KEY, IDENTITY_FIELD, NAME_FIELD, SETTINGS_KEY, UNKNOWN_CATEGORY,
    VARIANT_FIELD,
};

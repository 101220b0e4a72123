//! Schema inference over an unknown-shape record collection.

mod analyzer;
mod categories;
mod field;
mod types;

pub use analyzer::analyze;
pub use categories::{tally_categories, CategoryUsage};
pub use field::{leaf_of, parent_of, FieldInfo, FieldSchema, MAX_EXAMPLES};
pub use types::FieldKind;

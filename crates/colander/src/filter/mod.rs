//! Record filtering against the active rule set.

mod engine;

pub use engine::{filter_record, FilterOptions};

//! Rebuilding rules from persisted settings.

mod aliases;
mod loader;

pub use aliases::{detect, DetectStats};
pub use loader::{replay, ReplayOutcome};

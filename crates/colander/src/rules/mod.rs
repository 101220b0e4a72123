//! The transform rule set and its serialized forms.

mod diff;
mod presets;
mod ruleset;

pub use diff::SettingsDiff;
pub use presets::FieldPreset;
pub use ruleset::RuleSet;

//! CLI command implementations.

pub mod diff;
pub mod export;
pub mod inspect;
pub mod replay;

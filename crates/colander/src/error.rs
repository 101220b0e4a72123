//! Error types for the Colander library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Colander operations.
#[derive(Debug, Error)]
pub enum ColanderError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input document is neither a record array nor a settings-wrapped object.
    #[error("Invalid document: {0}")]
    Document(String),

    /// An operation that requires a loaded collection was called before one
    /// was loaded.
    #[error("No collection loaded: {0}")]
    NoCollection(String),

    /// A field rename was rejected at the mutation boundary.
    #[error("Rename rejected: {0}")]
    Rename(String),

    /// A category label operation collided with an existing label.
    #[error("Label conflict: {0}")]
    Label(String),

    /// An alias term was rejected at the mutation boundary.
    #[error("Alias rejected: {0}")]
    Alias(String),

    /// Error saving or restoring session state.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for Colander operations.
pub type Result<T> = std::result::Result<T, ColanderError>;

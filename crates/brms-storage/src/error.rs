//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing file exists but is not a JSON object.
    #[error("Corrupt store at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Key not found.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

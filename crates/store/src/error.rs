//! Error types for settings storage.

use std::{io, path::PathBuf, result};

/// Result type for settings storage operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while reading or writing stored settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read, write or rename a settings file.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to serialize the records.
    #[error("failed to encode settings: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

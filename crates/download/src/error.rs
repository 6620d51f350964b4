//! Error types for instance downloads.

use std::{io, path::PathBuf, result};

use reqwest::StatusCode;

/// Result type for download operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while talking to the generation server or saving its output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request could not be built, sent or read.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// Health endpoint did not report `ok`.
    #[error("unexpected health response: {0}")]
    Unhealthy(String),

    /// Failed to write the downloaded font.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

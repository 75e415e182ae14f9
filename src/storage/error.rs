use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`KeyValueStorage`](super::KeyValueStorage).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access storage file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize storage contents: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Storage is disabled")]
    Disabled,
}

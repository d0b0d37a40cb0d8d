//! Storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to decode '{key}': {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

//! Error types for bm-core
//!
//! The taxonomy follows the recovery policy of the mirroring pipeline:
//! `Config`, `Auth` and `List` are fatal and abort the run; `Download`
//! (and the `Io` raised while writing a single object) is recovered
//! inside the per-object download loops.

use thiserror::Error;

/// Result type alias for bm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bm-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required credential or setting missing; raised before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential exchange or store-handle creation failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Listing the container (or a prefix of it) failed
    #[error("Listing failed: {0}")]
    List(String),

    /// A single object's fetch failed
    #[error("Download failed for '{key}': {message}")]
    Download { key: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `Download` error for the given object key
    pub fn download(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Download {
            key: key.into(),
            message: message.into(),
        }
    }
}

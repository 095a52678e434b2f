//! Error types for the setforge_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for setforge_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored method discriminator is not one we recognize.
    ///
    /// Signals storage corruption, not user error. Fatal to the one
    /// entity being reconstructed, never to the store as a whole.
    #[error("corrupt method encoding: unknown discriminator {0:?}")]
    CorruptEncoding(String),

    /// Store operation error
    #[error("Store error: {0}")]
    Store(String),
}

//! Common error types for groupie-tracker

use thiserror::Error;

/// Common result type for groupie-tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the groupie-tracker crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error in {path}: {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! Structured error types for inkpost-core.
//!
//! Uses `thiserror` for composable library errors. Binary consumers can
//! still wrap these in `anyhow` for convenience.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for inkpost-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration file missing
    #[error("Config not found at {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file failed to parse
    #[error("Failed to parse config file: {source}")]
    ConfigParse {
        #[from]
        source: toml::de::Error,
    },

    /// Required configuration value missing
    #[error("Missing required config value '{field}'")]
    MissingField { field: &'static str },
}

/// Result type alias for inkpost-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

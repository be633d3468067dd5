//! Error types for configuration loading and batch runs.
//!
//! The transform itself has no error type: a page it cannot make sense of is
//! returned as it was.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Errors for a single input handled by the batch runner
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not valid UTF-8")]
    NotUtf8(PathBuf),

    #[error("an output path cannot be used with directory input `{0}`")]
    OutputForDirectory(PathBuf),

    #[error("walking `{0}` failed")]
    Walk(PathBuf, #[source] jwalk::Error),
}

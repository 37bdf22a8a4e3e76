//! Error types for splitlog

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while setting up a channel or its sinks
///
/// Emitting records never fails; only construction and reconfiguration do.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Invalid channel name, severity value, or configuration document
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A log directory or file could not be created or opened
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        /// Path that was being created or opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl SetupError {
    /// Build a configuration error from any displayable message
    pub fn configuration(message: impl Into<String>) -> Self {
        SetupError::Configuration(message.into())
    }

    /// Build a filesystem error for `path`
    pub fn filesystem(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SetupError::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, SetupError::Configuration(_))
    }

    /// Whether this is a filesystem error
    pub fn is_filesystem(&self) -> bool {
        matches!(self, SetupError::Filesystem { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SetupError>;

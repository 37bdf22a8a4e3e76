//! Configuration management for splitlog
//!
//! A delegate can be described in TOML:
//!
//! ```toml
//! name = "sync"
//! print_level = "info"
//! file_path = "~/logs/sync.log"
//! file_level = "debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SetupError};
use crate::logging::{Severity, DEFAULT_FILE_PATH};

/// Settings for one [`LogDelegate`](crate::logging::LogDelegate)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelegateConfig {
    /// Channel name (required, non-empty)
    pub name: String,

    /// Console threshold (default: INFO)
    #[serde(default)]
    pub print_level: Severity,

    /// Log file path; `~` and `$VAR` are expanded (default: ".")
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// File threshold (default: INFO)
    #[serde(default)]
    pub file_level: Severity,
}

fn default_file_path() -> String {
    DEFAULT_FILE_PATH.to_string()
}

impl DelegateConfig {
    /// Configuration for `name` with every other setting at its default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            print_level: Severity::default(),
            file_path: default_file_path(),
            file_level: Severity::default(),
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SetupError::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SetupError::configuration(format!("Failed to serialize config: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SetupError::filesystem(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| SetupError::filesystem(path, e))
    }

    /// The file path with `~` and environment variables expanded
    pub fn resolved_file_path(&self) -> Result<PathBuf> {
        shellexpand::full(&self.file_path)
            .map(|expanded| PathBuf::from(expanded.as_ref()))
            .map_err(|e| {
                SetupError::configuration(format!(
                    "Failed to expand log file path {:?}: {}",
                    self.file_path, e
                ))
            })
    }
}

/// Get the splitlog configuration directory (`<config dir>/splitlog`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("splitlog"))
}

/// Get the path of the default config file, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

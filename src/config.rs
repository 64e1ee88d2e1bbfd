//! Application Configuration
//! Optional JSON settings file read once at startup.

use crate::equations::EquationFields;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Settings file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "line_graph.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Export the PDF automatically after every successful plot
    pub auto_export: bool,
    /// Directory for automatic exports
    pub export_dir: PathBuf,
    /// Ask for a file name on manual export instead of writing to `export_dir`
    pub ask_export_path: bool,
    pub open_after_export: bool,
    pub window: WindowConfig,
    pub defaults: DefaultEquations,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auto_export: false,
            export_dir: PathBuf::from("."),
            ask_export_path: true,
            open_after_export: false,
            window: WindowConfig::default(),
            defaults: DefaultEquations::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 760.0,
        }
    }
}

/// Equations shown when the window opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultEquations {
    pub first: EquationFields,
    pub second: EquationFields,
}

impl Default for DefaultEquations {
    fn default() -> Self {
        Self {
            first: EquationFields::standard("1", "1", "0"),
            second: EquationFields {
                m: "-1".to_string(),
                ..EquationFields::standard("2", "1", "0")
            },
        }
    }
}

impl AppConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}

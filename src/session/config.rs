//! Application configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "tick_interval_ms": 100, "records_path": "data/record.csv" }
//! ```

use crate::core::history::DEFAULT_HISTORY_CAPACITY;
use crate::registry::WindowSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the optional config file read from the working directory.
pub const CONFIG_FILE: &str = "arena-stats.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick interval must be at least 1 ms")]
    ZeroInterval,
}

/// Image assets used as button captions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub remove_image: String,
    pub confirm_image: String,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            remove_image: "del_image.png".to_string(),
            confirm_image: "enter_image.png".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Casino Arena Statistics".to_string(),
            width: 1300,
            height: 900,
        }
    }
}

impl From<&WindowConfig> for WindowSpec {
    fn from(window: &WindowConfig) -> Self {
        WindowSpec {
            title: window.title.clone(),
            width: window.width,
            height: window.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub roster_path: PathBuf,
    pub records_path: PathBuf,
    pub tick_interval_ms: u64,
    pub history_capacity: usize,
    pub window: WindowConfig,
    pub assets: Assets,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("char_name.csv"),
            records_path: PathBuf::from("record.csv"),
            tick_interval_ms: 250,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            window: WindowConfig::default(),
            assets: Assets::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

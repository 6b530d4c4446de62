//! Application configuration
//!
//! Loaded from, lowest precedence first:
//! 1. Default values
//! 2. Config file (~/.config/snipdoc/config.toml, or the path in SNIPDOC_CONFIG)
//! 3. Environment variables (SNIPDOC_* prefix)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "SNIPDOC";
const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted collection and theme
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Quiet period before a changed search query is applied
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Program (with arguments) that receives copied code on stdin
    #[serde(default)]
    pub clipboard_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            clipboard_command: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Reads `path` if it exists, then applies environment overrides
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            if !val.is_empty() {
                self.data_dir = PathBuf::from(val);
            }
        }

        if let Ok(val) = std::env::var(format!("{}_DEBOUNCE_MS", ENV_PREFIX)) {
            match val.parse() {
                Ok(ms) => self.search_debounce_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid {ENV_PREFIX}_DEBOUNCE_MS: {val}"),
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snipdoc")
            .join("config.toml")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snipdoc")
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

//! Application configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "JIT_CONSOLE_CONFIG";

/// Environment variable overriding the backend URL.
pub const BASE_URL_VAR: &str = "JIT_CONSOLE_URL";

const APP_DIR: &str = "jit-console";
const CONFIG_FILE: &str = "config.json";
const SETTINGS_FILE: &str = "settings.json";

/// Per-user configuration directory
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Backend URL, e.g. `https://jit.example.com/`
    pub base_url: String,
    /// Where the selected environment is remembered
    pub settings_file: Option<PathBuf>,
    /// Use canned data instead of the backend
    pub debug_model: bool,
    /// Timeout of a single backend request
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            settings_file: None,
            debug_model: false,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load the configuration from `JIT_CONSOLE_CONFIG` or the default
    /// location, then apply `JIT_CONSOLE_URL`.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map_or_else(|| config_dir().join(CONFIG_FILE), PathBuf::from);

        let mut config = Self::from_file(&path)?;
        if let Ok(url) = std::env::var(BASE_URL_VAR) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Effective settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.settings_file
            .clone()
            .unwrap_or_else(|| config_dir().join(SETTINGS_FILE))
    }
}

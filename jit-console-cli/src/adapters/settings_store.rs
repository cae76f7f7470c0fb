//! Settings store
//!
//! Remembers the selected environment in a JSON file.

use std::path::PathBuf;

use async_trait::async_trait;
use jit_console_core::{CoreError, CoreResult, SettingsStore};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

/// Persisted settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// JSON file backed settings store
pub struct JsonSettingsStore {
    path: PathBuf,
    /// In-memory cache, `None` until first loaded
    cache: Mutex<Option<LocalSettings>>,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    async fn load_from_file(&self) -> CoreResult<LocalSettings> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))?;
        if !exists {
            return Ok(LocalSettings::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    async fn save_to_file(&self, settings: &LocalSettings) -> CoreResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .await
                    .map_err(|e| CoreError::StorageError(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn environment(&self) -> CoreResult<Option<String>> {
        let mut cache = self.cache.lock().await;
        if let Some(settings) = cache.as_ref() {
            return Ok(settings.environment.clone());
        }

        let settings = self.load_from_file().await?;
        let environment = settings.environment.clone();
        *cache = Some(settings);
        Ok(environment)
    }

    async fn set_environment(&self, name: &str) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        let mut settings = match cache.as_ref() {
            Some(settings) => settings.clone(),
            None => self.load_from_file().await.unwrap_or_default(),
        };
        settings.environment = Some(name.to_string());

        self.save_to_file(&settings).await?;
        *cache = Some(settings);
        Ok(())
    }
}

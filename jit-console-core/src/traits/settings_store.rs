//! Local settings persistence abstract Trait

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;

/// Local Settings Trait
///
/// Holds the environment the user selected last, durable across reloads.
///
/// Platform implementation:
/// - CLI: `JsonSettingsStore` (JSON file)
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Get the last selected environment
    async fn environment(&self) -> CoreResult<Option<String>>;

    /// Remember the selected environment
    ///
    /// # Arguments
    /// * `name` - Environment name
    async fn set_environment(&self, name: &str) -> CoreResult<()>;
}

/// Settings kept in memory for the lifetime of the process
#[derive(Default)]
pub struct InMemorySettingsStore {
    environment: RwLock<Option<String>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(name: impl Into<String>) -> Self {
        Self {
            environment: RwLock::new(Some(name.into())),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn environment(&self) -> CoreResult<Option<String>> {
        Ok(self.environment.read().await.clone())
    }

    async fn set_environment(&self, name: &str) -> CoreResult<()> {
        *self.environment.write().await = Some(name.to_string());
        Ok(())
    }
}

//! Offline model with canned data, for trying the shell without a backend

use std::time::Duration;

use async_trait::async_trait;
use jit_console_core::error::{CoreResult, ModelError};
use jit_console_core::types::{Environment, EnvironmentList, ModelContext};
use jit_console_core::ModelClient;

/// Simulated backend latency
const LATENCY: Duration = Duration::from_millis(200);

/// Environment name that makes `initialize` fail, to exercise the error banner.
pub const FAILING_ENVIRONMENT: &str = "broken";

pub struct DebugModelClient {
    environments: Vec<Environment>,
}

impl DebugModelClient {
    pub fn new() -> Self {
        Self {
            environments: vec![
                Environment::new("dev", "Development"),
                Environment::new("prod", "Production"),
                Environment::new(FAILING_ENVIRONMENT, "Always fails to load"),
            ],
        }
    }
}

impl Default for DebugModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for DebugModelClient {
    async fn list_environments(&self) -> CoreResult<EnvironmentList> {
        tokio::time::sleep(LATENCY).await;
        Ok(EnvironmentList {
            environments: self.environments.clone(),
        })
    }

    async fn initialize(
        &self,
        environment: &str,
        resource: Option<&str>,
    ) -> CoreResult<ModelContext> {
        tokio::time::sleep(LATENCY).await;
        log::debug!("Debug model initialized for {environment} ({resource:?})");

        let known = self.environments.iter().any(|e| e.name == environment);
        if !known || environment == FAILING_ENVIRONMENT {
            return Err(ModelError::from_response(
                404,
                "Not Found",
                Some("debug-trace".to_string()),
                &format!(r#"{{"message": "The environment '{environment}' does not exist"}}"#),
            )
            .into());
        }

        Ok(ModelContext::new("debug@example.com", "debug"))
    }
}

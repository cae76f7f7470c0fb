//! Backend model abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{EnvironmentList, ModelContext};

/// Backend Model Trait
///
/// Platform implementation:
/// - CLI: `HttpModelClient` (reqwest), `DebugModelClient` (canned data)
///
/// Failed HTTP calls are reported as `CoreError::Model` carrying the status
/// and trace id.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// List the environments available to the current user
    async fn list_environments(&self) -> CoreResult<EnvironmentList>;

    /// Initialize the model against an environment
    ///
    /// # Arguments
    /// * `environment` - Environment name
    /// * `resource` - Resource path to display, if any
    async fn initialize(&self, environment: &str, resource: Option<&str>)
        -> CoreResult<ModelContext>;
}

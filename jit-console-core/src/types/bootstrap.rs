//! Per-load bootstrap state.

use super::environment::ModelContext;

/// Environment and resource determined for one page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapContext {
    /// Active environment, `None` if it could not be determined
    pub environment: Option<String>,
    /// Resource path to display, e.g. `/environments/prod/groups`
    pub resource: Option<String>,
}

impl BootstrapContext {
    /// No environment; the user has to pick one.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Environment and resource taken from the location fragment.
    pub fn for_route(environment: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            environment: Some(environment.into()),
            resource: Some(resource.into()),
        }
    }

    /// Environment remembered from a previous session.
    pub fn for_persisted(environment: impl Into<String>) -> Self {
        let environment = environment.into();
        let resource = format!("/environments/{environment}");
        Self {
            environment: Some(environment),
            resource: Some(resource),
        }
    }
}

/// Result of a completed bootstrap: the initialized model session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub environment: String,
    pub resource: Option<String>,
    pub context: ModelContext,
}

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The model is initialized and the view layer can take over
    Ready(Session),
    /// An environment was selected and persisted; a full reload is under way
    Reloading { environment: String },
    /// No environment could be determined and the selection was rejected
    Unresolved,
}

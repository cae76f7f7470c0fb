//! Environment and model context types returned by the model.

use serde::{Deserialize, Serialize};

/// A named scope of resources the user can operate against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name, also used in resource paths
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl Environment {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Response of the environment listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentList {
    #[serde(default)]
    pub environments: Vec<Environment>,
}

/// The signed-in subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub email: String,
}

/// Backend application information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub version: String,
}

/// Context returned by model initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelContext {
    pub subject: Subject,
    pub application: ApplicationInfo,
}

impl ModelContext {
    pub fn new(email: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            subject: Subject {
                email: email.into(),
            },
            application: ApplicationInfo {
                version: version.into(),
            },
        }
    }
}

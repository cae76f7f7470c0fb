//! Business logic service layer

mod banner_service;
mod bootstrap_service;

pub use banner_service::{ErrorBanner, AUTO_DISMISS_DELAY};
pub use bootstrap_service::{BootstrapService, TITLE_PREFIX};

use std::sync::Arc;

use crate::dialog::EnvironmentSelector;
use crate::traits::{
    BannerSurface, HeaderSurface, ListSurface, ModalSurface, ModelClient, Navigator,
    SettingsStore,
};

/// Rendering surfaces of the shell
#[derive(Clone)]
pub struct Surfaces {
    /// Modal of the environment dialog
    pub modal: Arc<dyn ModalSurface>,
    /// List inside the environment dialog
    pub list: Arc<dyn ListSurface>,
    /// Error banner
    pub banner: Arc<dyn BannerSurface>,
    /// Application header
    pub header: Arc<dyn HeaderSurface>,
}

/// Service context - holds all dependencies of one page load
///
/// The host creates a fresh context for every page load and injects its
/// platform-specific implementations. Dropping it ends the page load.
pub struct ServiceContext {
    /// Backend model
    pub model: Arc<dyn ModelClient>,
    /// Local settings
    pub settings: Arc<dyn SettingsStore>,
    /// Navigation state
    pub navigator: Arc<dyn Navigator>,
    /// Rendering surfaces
    pub surfaces: Surfaces,
    banner: ErrorBanner,
}

impl ServiceContext {
    /// Create service context
    #[must_use]
    pub fn new(
        model: Arc<dyn ModelClient>,
        settings: Arc<dyn SettingsStore>,
        navigator: Arc<dyn Navigator>,
        surfaces: Surfaces,
    ) -> Self {
        let banner = ErrorBanner::new(Arc::clone(&surfaces.banner), Arc::clone(&navigator));
        Self {
            model,
            settings,
            navigator,
            surfaces,
            banner,
        }
    }

    /// Error banner of this page load
    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    /// Create the environment selection dialog
    pub fn environment_selector(&self) -> EnvironmentSelector {
        EnvironmentSelector::new(
            Arc::clone(&self.model),
            Arc::clone(&self.surfaces.modal),
            Arc::clone(&self.surfaces.list),
        )
    }
}

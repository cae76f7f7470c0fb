//! Collaborator abstraction trait definitions

mod model_client;
mod navigator;
mod settings_store;
mod surfaces;

pub use model_client::ModelClient;
pub use navigator::{strip_fragment, Navigator};
pub use settings_store::{InMemorySettingsStore, SettingsStore};
pub use surfaces::{
    BannerSurface, HeaderSurface, ListSurface, ModalSurface, SelectionListener, ACTION_ACCEPT,
    ACTION_CLOSE,
};

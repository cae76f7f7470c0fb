//! Terminal implementations of the core host traits

mod debug_model;
mod http_model;
mod navigator;
mod settings_store;
mod terminal;

pub use debug_model::DebugModelClient;
pub use http_model::HttpModelClient;
pub use navigator::CliNavigator;
pub use settings_store::JsonSettingsStore;
pub use terminal::TerminalUi;

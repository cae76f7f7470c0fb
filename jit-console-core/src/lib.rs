//! JIT Console Core Library
//!
//! Provides the client-side shell logic of the access console:
//! - Environment resolution and model bootstrap (Bootstrap Service)
//! - Modal dialog lifecycle and the environment selector (Dialogs)
//! - Error banner presentation (Banner Service)
//! - Duration parsing, formatting and picker ranges
//!
//! This library is platform-independent. Model access, settings storage,
//! navigation and rendering are abstracted through traits that the host
//! (terminal, browser, ...) implements.

pub mod dialog;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, FormatError, ModelError};
pub use services::{ServiceContext, Surfaces};
pub use traits::{
    BannerSurface, HeaderSurface, ListSurface, ModalSurface, ModelClient, Navigator,
    SettingsStore,
};
pub use types::{Duration, Instant};

//! Rendering collaborators
//!
//! Adapters over the widget toolkit compose the widget objects; the core
//! only sees these narrow contracts.

use std::sync::Arc;

use crate::dialog::ClosedSignal;
use crate::types::{BannerMessage, ListItem};

/// Action tag of a modal closed by accepting it.
pub const ACTION_ACCEPT: &str = "accept";

/// Action tag of a modal closed without accepting it.
pub const ACTION_CLOSE: &str = "close";

/// A modal surface (dialog).
///
/// When the modal closes, for whatever reason, the surface emits the
/// `ClosedSignal` it was opened with, carrying the action tag.
pub trait ModalSurface: Send + Sync {
    fn open(&self, on_closed: ClosedSignal);

    /// Close the modal; the surface then emits the closed signal with `action`.
    fn close(&self, action: &str);
}

/// Receives row selections from a list surface.
pub trait SelectionListener: Send + Sync {
    fn on_select(&self, index: usize);
}

/// A list of rows.
pub trait ListSurface: Send + Sync {
    fn clear_rows(&self);

    fn add_row(&self, item: ListItem);

    /// Register the selection listener, replacing any previous one.
    fn listen(&self, listener: Arc<dyn SelectionListener>);

    fn unlisten(&self);
}

/// The error banner at the top of the screen.
pub trait BannerSurface: Send + Sync {
    fn show(&self, message: &BannerMessage);

    fn hide(&self);
}

/// Display fields of the application header.
pub trait HeaderSurface: Send + Sync {
    fn set_environment(&self, name: &str);

    fn set_title(&self, title: &str);

    fn set_signed_in_user(&self, email: &str);

    fn set_application_version(&self, version: &str);
}

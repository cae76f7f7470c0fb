//! Error banner service

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::CoreError;
use crate::traits::{BannerSurface, Navigator};
use crate::types::{BannerMessage, Severity, RELOAD_TARGET};

/// Recoverable errors are hidden again after this delay.
pub const AUTO_DISMISS_DELAY: Duration = Duration::from_secs(10);

/// Presents errors in the banner surface.
///
/// Recoverable errors clear themselves after [`AUTO_DISMISS_DELAY`]; fatal
/// errors stay until the user reloads. Showing a new error replaces the
/// current one and its pending auto-dismiss.
pub struct ErrorBanner {
    surface: Arc<dyn BannerSurface>,
    navigator: Arc<dyn Navigator>,
    auto_dismiss: Duration,
    dismiss_timer: Mutex<Option<JoinHandle<()>>>,
}

impl ErrorBanner {
    #[must_use]
    pub fn new(surface: Arc<dyn BannerSurface>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            surface,
            navigator,
            auto_dismiss: AUTO_DISMISS_DELAY,
            dismiss_timer: Mutex::new(None),
        }
    }

    /// Show `error` in the banner.
    ///
    /// Must be called from within a tokio runtime for recoverable errors,
    /// which schedule their auto-dismiss on it.
    pub fn show_error(&self, error: &CoreError, severity: Severity) {
        if error.is_expected() {
            log::warn!("Showing {severity:?} error: {error}");
        } else {
            log::error!("Showing {severity:?} error: {error}");
        }

        let message = BannerMessage::from_error(error, severity);

        self.cancel_dismiss_timer();
        self.surface.show(&message);

        if severity == Severity::Recoverable {
            let surface = Arc::clone(&self.surface);
            let delay = self.auto_dismiss;
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                surface.hide();
            });
            *self.timer() = Some(handle);
        }
    }

    /// Hide the banner.
    pub fn clear(&self) {
        self.cancel_dismiss_timer();
        self.surface.hide();
    }

    /// The banner's reload action: restart with the environment dialog.
    pub fn reload(&self) {
        log::info!("Reloading to {RELOAD_TARGET}");
        self.navigator.navigate(RELOAD_TARGET);
    }

    fn timer(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.dismiss_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel_dismiss_timer(&self) {
        if let Some(handle) = self.timer().take() {
            handle.abort();
        }
    }
}

impl Drop for ErrorBanner {
    fn drop(&mut self) {
        self.cancel_dismiss_timer();
    }
}

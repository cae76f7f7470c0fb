//! Navigation state of the terminal host

use std::sync::{Mutex, PoisonError};

use jit_console_core::Navigator;
use reqwest::Url;

/// Location of one page load.
///
/// Navigations are not followed immediately; the page-load loop picks up the
/// pending target and starts a new page load with it.
pub struct CliNavigator {
    href: String,
    pending: Mutex<Option<String>>,
}

impl CliNavigator {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            pending: Mutex::new(None),
        }
    }

    /// The absolute location requested by the last `navigate`, if any.
    pub fn take_navigation(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn resolve(&self, target: &str) -> String {
        match Url::parse(&self.href).and_then(|base| base.join(target)) {
            Ok(url) => url.to_string(),
            Err(e) => {
                log::warn!("Cannot resolve {target} against {}: {e}", self.href);
                target.to_string()
            }
        }
    }
}

impl Navigator for CliNavigator {
    fn href(&self) -> String {
        self.href.clone()
    }

    fn navigate(&self, target: &str) {
        let location = self.resolve(target);
        log::debug!("Navigating to {location}");
        *self.pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(location);
    }
}

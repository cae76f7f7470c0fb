//! Line-oriented terminal rendering of the shell surfaces
//!
//! Everything is written to one output stream. Input lines are routed by
//! [`TerminalUi::dispatch`]: while the modal is open, numbers select a row
//! and `q` dismisses it; otherwise the line is a command for the host loop.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jit_console_core::dialog::ClosedSignal;
use jit_console_core::traits::{SelectionListener, ACTION_CLOSE};
use jit_console_core::types::{BannerMessage, ListItem};
use jit_console_core::{BannerSurface, HeaderSurface, ListSurface, ModalSurface};

/// Longest primary text rendered in a row
const MAX_PRIMARY_CHARS: usize = 40;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct TerminalUi {
    out: Mutex<Box<dyn Write + Send>>,
    modal: Mutex<Option<ClosedSignal>>,
    rows: Mutex<usize>,
    listener: Mutex<Option<Arc<dyn SelectionListener>>>,
    banner_visible: Mutex<bool>,
}

impl TerminalUi {
    /// Render to stdout
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            modal: Mutex::new(None),
            rows: Mutex::new(0),
            listener: Mutex::new(None),
            banner_visible: Mutex::new(false),
        }
    }

    /// Write one line of output
    pub fn line(&self, text: &str) {
        let mut out = lock(&self.out);
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            log::warn!("Failed to write to terminal: {e}");
        }
    }

    pub fn is_modal_open(&self) -> bool {
        lock(&self.modal).is_some()
    }

    /// Route one line of user input.
    ///
    /// Returns the line as a command when no modal consumed it.
    pub fn dispatch(&self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if !self.is_modal_open() {
            return Some(input.to_string());
        }

        if input.eq_ignore_ascii_case("q") {
            self.dismiss();
            return None;
        }

        match input.parse::<usize>() {
            Ok(number) if number >= 1 => {
                let listener = lock(&self.listener).clone();
                match listener {
                    Some(listener) => listener.on_select(number - 1),
                    None => self.line("Still loading, please wait."),
                }
            }
            _ => self.line("Enter the number of an entry, or q to cancel."),
        }
        None
    }

    /// The user closes the modal without choosing.
    fn dismiss(&self) {
        let signal = lock(&self.modal).take();
        if let Some(signal) = signal {
            signal.emit(ACTION_CLOSE);
        }
    }

    pub fn print_help(&self) {
        self.line("Commands: env (switch environment), reload, help, quit");
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalSurface for TerminalUi {
    fn open(&self, on_closed: ClosedSignal) {
        *lock(&self.modal) = Some(on_closed);
        self.line("");
        self.line("Select an environment (number, q to cancel):");
    }

    fn close(&self, action: &str) {
        let signal = lock(&self.modal).take();
        if let Some(signal) = signal {
            signal.emit(action);
        }
    }
}

impl ListSurface for TerminalUi {
    fn clear_rows(&self) {
        *lock(&self.rows) = 0;
    }

    fn add_row(&self, item: ListItem) {
        let number = {
            let mut rows = lock(&self.rows);
            *rows += 1;
            *rows
        };

        let mut text = format!("  {number:>2}) ");
        if let Some(icon) = &item.icon {
            text.push_str(&format!("[{icon}] "));
        }
        text.push_str(&item.display_primary(MAX_PRIMARY_CHARS));
        if let Some(secondary) = &item.secondary {
            text.push_str(&format!("  {secondary}"));
        }
        if let Some(href) = &item.href {
            text.push_str(&format!("  <{href}>"));
        }
        self.line(&text);
    }

    fn listen(&self, listener: Arc<dyn SelectionListener>) {
        *lock(&self.listener) = Some(listener);
    }

    fn unlisten(&self) {
        *lock(&self.listener) = None;
    }
}

impl BannerSurface for TerminalUi {
    fn show(&self, message: &BannerMessage) {
        *lock(&self.banner_visible) = true;
        self.line(&format!("! {}", message.text));
        if let Some(details) = &message.details {
            self.line(&format!("  {details}"));
        }
        if message.reload_target.is_some() {
            self.line("  Type 'reload' to start over.");
        }
    }

    fn hide(&self) {
        let was_visible = std::mem::replace(&mut *lock(&self.banner_visible), false);
        if was_visible {
            log::debug!("Error banner dismissed");
        }
    }
}

impl HeaderSurface for TerminalUi {
    fn set_environment(&self, name: &str) {
        self.line(&format!("Environment: {name}"));
    }

    fn set_title(&self, title: &str) {
        log::debug!("Title: {title}");
    }

    fn set_signed_in_user(&self, email: &str) {
        self.line(&format!("Signed in as {email}"));
    }

    fn set_application_version(&self, version: &str) {
        self.line(&format!("Server version {version}"));
    }
}

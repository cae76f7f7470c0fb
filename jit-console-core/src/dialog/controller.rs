//! Modal dialog lifecycle
//!
//! A dialog moves `Closed → Open → {Accepted, Cancelled, Errored}` once per
//! show cycle. The outcome of a cycle is delivered through a oneshot
//! channel whose sender is consumed on settlement, so a cycle can settle at
//! most once: later signals, cancellations and signals from older cycles
//! find no sender and are ignored.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{CoreError, CoreResult};
use crate::traits::{ModalSurface, ACTION_ACCEPT, ACTION_CLOSE};

/// Lifecycle state of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
    Accepted,
    Cancelled,
    Errored,
}

impl DialogState {
    /// Whether the last show cycle has settled.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Cancelled | Self::Errored)
    }
}

trait CloseListener: Send + Sync {
    fn on_closed(&self, cycle: u64, action: &str);
}

/// Handed to the modal surface on open; the surface emits it when the modal closes.
#[derive(Clone)]
pub struct ClosedSignal {
    cycle: u64,
    listener: Arc<dyn CloseListener>,
}

impl ClosedSignal {
    /// Report that the modal closed with `action` (`"accept"`, `"close"`, ...).
    pub fn emit(&self, action: &str) {
        self.listener.on_closed(self.cycle, action);
    }
}

impl fmt::Debug for ClosedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosedSignal")
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

struct DialogInner<T> {
    state: DialogState,
    cycle: u64,
    result: Option<T>,
    pending: Option<oneshot::Sender<CoreResult<T>>>,
}

struct DialogShared<T> {
    inner: Mutex<DialogInner<T>>,
}

impl<T> DialogShared<T> {
    fn lock(&self) -> MutexGuard<'_, DialogInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send> CloseListener for DialogShared<T> {
    fn on_closed(&self, cycle: u64, action: &str) {
        let (sender, outcome) = {
            let mut inner = self.lock();
            if inner.cycle != cycle {
                return;
            }
            let Some(sender) = inner.pending.take() else {
                return;
            };

            let result = if action == ACTION_ACCEPT {
                inner.result.take()
            } else {
                None
            };
            let outcome = match result {
                Some(value) => {
                    inner.state = DialogState::Accepted;
                    Ok(value)
                }
                None => {
                    inner.state = DialogState::Cancelled;
                    Err(CoreError::Cancelled)
                }
            };
            (sender, outcome)
        };

        // The receiver may already be gone; nobody is waiting then.
        let _ = sender.send(outcome);
    }
}

/// Pending outcome of one show cycle.
///
/// Resolves with the dialog result on accept, `CoreError::Cancelled` on
/// dismissal, or the error passed to [`DialogController::cancel`].
#[must_use = "a dialog outcome does nothing unless awaited"]
pub struct DialogOutcome<T> {
    receiver: oneshot::Receiver<CoreResult<T>>,
}

impl<T> Future for DialogOutcome<T> {
    type Output = CoreResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(CoreError::Cancelled)))
    }
}

/// Drives a modal surface through show cycles and settles their outcomes.
///
/// Concrete dialogs hold a controller, store their result with
/// [`set_result`](Self::set_result) and then close with `"accept"`, in that
/// order, so the closed signal observes a populated result.
pub struct DialogController<T> {
    surface: Arc<dyn ModalSurface>,
    shared: Arc<DialogShared<T>>,
}

impl<T> Clone for DialogController<T> {
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> DialogController<T> {
    pub fn new(surface: Arc<dyn ModalSurface>) -> Self {
        Self {
            surface,
            shared: Arc::new(DialogShared {
                inner: Mutex::new(DialogInner {
                    state: DialogState::Closed,
                    cycle: 0,
                    result: None,
                    pending: None,
                }),
            }),
        }
    }

    pub fn state(&self) -> DialogState {
        self.shared.lock().state
    }

    /// Whether a show cycle is waiting for its outcome.
    pub fn is_pending(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    /// Open the modal and start a new show cycle.
    ///
    /// Only one cycle can be pending at a time; opening again before the
    /// previous outcome settled fails with `CoreError::DialogBusy`.
    pub fn show(&self) -> CoreResult<DialogOutcome<T>> {
        let (signal, receiver) = {
            let mut inner = self.shared.lock();
            if inner.pending.is_some() {
                return Err(CoreError::DialogBusy);
            }

            let (sender, receiver) = oneshot::channel();
            inner.cycle += 1;
            inner.state = DialogState::Open;
            inner.result = None;
            inner.pending = Some(sender);

            let listener: Arc<dyn CloseListener> = self.shared.clone();
            (
                ClosedSignal {
                    cycle: inner.cycle,
                    listener,
                },
                receiver,
            )
        };

        self.surface.open(signal);
        Ok(DialogOutcome { receiver })
    }

    /// Store the value an `"accept"` close resolves with.
    pub fn set_result(&self, value: T) {
        self.shared.lock().result = Some(value);
    }

    /// Ask the surface to close with an action tag; the closed signal settles the outcome.
    pub fn close_with(&self, action: &str) {
        self.surface.close(action);
    }

    /// Close the modal and reject the pending outcome with `error`.
    ///
    /// No-op once the outcome has settled.
    pub fn cancel(&self, error: CoreError) {
        let sender = {
            let mut inner = self.shared.lock();
            let Some(sender) = inner.pending.take() else {
                return;
            };
            inner.state = DialogState::Errored;
            sender
        };

        self.surface.close(ACTION_CLOSE);
        let _ = sender.send(Err(error));
    }

    /// Force the modal closed.
    ///
    /// Does not settle anything itself: a still pending outcome is settled
    /// by the closed signal the surface emits.
    pub fn close(&self) {
        {
            let mut inner = self.shared.lock();
            if inner.state.is_terminal() {
                inner.state = DialogState::Closed;
            }
        }
        self.surface.close(ACTION_CLOSE);
    }
}

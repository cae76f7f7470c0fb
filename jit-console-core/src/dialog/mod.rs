//! Modal dialogs

mod controller;
mod environment_selector;

pub use controller::{ClosedSignal, DialogController, DialogOutcome, DialogState};
pub use environment_selector::EnvironmentSelector;

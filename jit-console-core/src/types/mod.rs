//! Type definitions

mod banner;
mod bootstrap;
mod duration;
mod environment;
mod instant;
mod list_item;

pub use banner::{BannerMessage, Severity, RELOAD_TARGET};
pub use bootstrap::{BootstrapContext, BootstrapOutcome, Session};
pub use duration::Duration;
pub use environment::{ApplicationInfo, Environment, EnvironmentList, ModelContext, Subject};
pub use instant::Instant;
pub use list_item::ListItem;

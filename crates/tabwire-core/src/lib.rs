//! Tabwire Core
//!
//! Hosts the tab widget inside a page:
//! - Runs initialization on document ready and on full load
//! - Clears and re-runs it after client-side navigation
//! - Routes clicks and key presses to the tab they land on

mod config;
mod error;
mod event;
mod page;
mod snapshot;

pub use config::Config;
pub use error::CoreError;
pub use event::{Event, EventOutcome, Lifecycle, ReadyState};
pub use page::Page;
pub use snapshot::{GroupSnapshot, PanelSnapshot, TabSnapshot};

// Re-export the widget and document types
pub use tabwire_dom::{Document, DomError, NodeId};
pub use tabwire_tabs::{GroupId, InitReport, Key, Markup, TabError, TabGroup};

pub type Result<T> = std::result::Result<T, CoreError>;

use tracing_subscriber::EnvFilter;

/// Initialize logging. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(env.as_deref(), default_filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Filter from the environment value when it is set and parses, else the fallback
fn log_filter(env: Option<&str>, default_filter: &str) -> EnvFilter {
    env.filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter))
}

//! Events delivered by the host page

use serde::{Deserialize, Serialize};
use tabwire_dom::NodeId;
use tabwire_tabs::Key;

/// `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadyState::Loading => "loading",
            ReadyState::Interactive => "interactive",
            ReadyState::Complete => "complete",
        }
    }
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReadyState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loading" => Ok(ReadyState::Loading),
            "interactive" => Ok(ReadyState::Interactive),
            "complete" => Ok(ReadyState::Complete),
            _ => Err(format!("Unknown ready state: {}", s)),
        }
    }
}

/// Lifecycle signals that (re)run initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// `DOMContentLoaded`
    DomContentLoaded,
    /// Window `load`
    Load,
    /// The site router finished swapping in a new page
    Navigated,
}

/// Input delivered to an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Click { target: NodeId },
    KeyDown { target: NodeId, key: Key },
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Event::Click { target }
    }

    pub fn key_down(target: NodeId, key: &str) -> Self {
        Event::KeyDown {
            target,
            key: Key::from_dom(key),
        }
    }

    pub fn target(&self) -> NodeId {
        match self {
            Event::Click { target } | Event::KeyDown { target, .. } => *target,
        }
    }
}

/// What dispatching an event did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// A tab changed the selection in response
    pub handled: bool,
    /// The browser default action was suppressed
    pub default_prevented: bool,
}

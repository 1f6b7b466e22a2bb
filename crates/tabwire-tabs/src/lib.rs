//! Tabwire Tab Groups
//!
//! Wires tab groups found in a document:
//! - Tabs and panels are paired by position inside each container
//! - Exactly one (tab, panel) pair is selected at any time
//! - Selection follows clicks and arrow/Home/End keys (roving tabindex)

mod error;
mod group;
mod ids;
mod keyboard;
mod manager;
mod markup;
mod selector;
mod state;

pub use error::TabError;
pub use group::{GroupId, TabGroup};
pub use ids::{IdGenerator, IdPair};
pub use keyboard::{resolve_key, Key, KeyResolution};
pub use manager::{InitReport, KeyOutcome, TabBinding, TabGroupManager};
pub use markup::Markup;
pub use selector::select;
pub use state::SelectionState;

pub type Result<T> = std::result::Result<T, TabError>;

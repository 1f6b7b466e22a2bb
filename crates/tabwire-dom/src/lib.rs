//! Tabwire DOM
//!
//! A small element tree that stands in for the browser DOM.
//! Nodes live in an arena owned by [`Document`] and are addressed by [`NodeId`].
//! Markup is loaded with `scraper` and written back out as HTML.

mod document;
mod error;
mod html;
mod node;

pub use document::Document;
pub use error::DomError;
pub use node::{NodeData, NodeId};

pub type Result<T> = std::result::Result<T, DomError>;

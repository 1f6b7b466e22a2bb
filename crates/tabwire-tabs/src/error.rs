//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab index {index} out of range for group of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Tab group not found: {0}")]
    GroupNotFound(String),

    #[error("DOM error: {0}")]
    Dom(#[from] tabwire_dom::DomError),
}

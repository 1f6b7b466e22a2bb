//! DOM error types

use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("Cannot append {child} under {parent}: would create a cycle")]
    Hierarchy { parent: NodeId, child: NodeId },
}

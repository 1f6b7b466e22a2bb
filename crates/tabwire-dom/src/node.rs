//! Node storage

use serde::{Deserialize, Serialize};

/// Handle to a node inside a [`crate::Document`].
///
/// A handle outlives detaching. Once the document discards the node its slot
/// may be reused, and the generation tells the old handle apart from the new
/// occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        /// Lowercase tag name
        tag: String,
        /// Attributes in source order
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

/// Arena slot; `node` is `None` while the slot sits on the free list
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node>,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element {
                tag: tag.to_ascii_lowercase(),
                attributes: Vec::new(),
            },
        }
    }

    pub(crate) fn text(content: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Text(content.to_string()),
        }
    }

    pub(crate) fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        match &self.data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeData::Text(_) => None,
        }
    }
}

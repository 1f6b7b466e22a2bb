//! A wired tab group

use serde::{Deserialize, Serialize};
use tabwire_dom::{Document, NodeId};

/// Identifies one wiring of a container. A re-wired container gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TabGroup {
    pub id: GroupId,
    /// The `.tabs` element
    pub container: NodeId,
    /// The `.tablist` element inside the container
    pub tablist: NodeId,
    /// Tabs in document order
    pub tabs: Vec<NodeId>,
    /// Panels in document order; `panels[i]` belongs to `tabs[i]`
    pub panels: Vec<NodeId>,
    /// Index of the selected tab
    pub selected: usize,
}

impl TabGroup {
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tab(&self, index: usize) -> Option<NodeId> {
        self.tabs.get(index).copied()
    }

    /// Panel paired with the tab at `index`.
    ///
    /// Pairing is purely positional. Tabs past the last panel have no panel.
    pub fn panel_for(&self, index: usize) -> Option<NodeId> {
        if index >= self.tabs.len() {
            return None;
        }
        self.panels.get(index).copied()
    }

    /// Panels with no tab to select them
    pub fn orphan_panels(&self) -> &[NodeId] {
        self.panels.get(self.tabs.len()..).unwrap_or(&[])
    }

    /// Whether the container is still part of the document
    pub fn is_live(&self, doc: &Document) -> bool {
        doc.is_connected(self.container)
    }
}

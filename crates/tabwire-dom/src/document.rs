//! Document tree
//!
//! The subset of the platform DOM the tab widget relies on: document-order
//! traversal, attributes, the class list, and a single focused element.

use crate::error::DomError;
use crate::node::{Node, NodeData, NodeId, Slot};
use crate::Result;

/// Tags that take part in sequential focus navigation without an explicit tabindex
const NATIVELY_FOCUSABLE: &[&str] = &["button", "input", "select", "textarea"];

#[derive(Debug, Clone)]
pub struct Document {
    /// Generational node arena. Detached nodes keep their slot until discarded.
    slots: Vec<Slot>,
    /// Discarded slots ready for reuse
    free: Vec<usize>,
    /// Occupied slots
    live: usize,
    /// The `body` element every connected node descends from
    root: NodeId,
    /// Element holding keyboard focus
    focused: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::element("body")),
            }],
            free: Vec::new(),
            live: 1,
            root: NodeId::new(0, 0),
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Live node behind a handle; stale handles resolve to nothing
    fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(DomError::NotFound(id))
    }

    fn attributes_mut(&mut self, id: NodeId) -> Result<&mut Vec<(String, String)>> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element { attributes, .. } => Ok(attributes),
            NodeData::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn require_element(&self, id: NodeId) -> Result<()> {
        if self.node(id)?.is_element() {
            Ok(())
        } else {
            Err(DomError::NotAnElement(id))
        }
    }

    // === Construction ===

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert(Node::element(tag))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.insert(Node::text(content))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(self.slots.len() - 1, 0)
    }

    /// Append `child` as the last child of `parent`, moving it if it is already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.require_element(parent)?;
        self.node(child)?;

        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Hierarchy { parent, child });
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove a node from its parent. Focus inside the removed subtree is dropped.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
            self.node_mut(id)?.parent = None;
        }

        if let Some(focused) = self.focused {
            if self.is_inclusive_ancestor(id, focused) {
                self.focused = None;
            }
        }

        Ok(())
    }

    /// Detach every child of `parent`
    pub fn remove_children(&mut self, parent: NodeId) -> Result<()> {
        let children = self.node(parent)?.children.clone();
        for child in children {
            self.detach(child)?;
        }
        Ok(())
    }

    /// Detach every child of `parent` and discard their subtrees.
    ///
    /// Handles into the discarded subtrees go stale and their slots are reused.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<()> {
        let children = self.node(parent)?.children.clone();
        for child in children {
            self.detach(child)?;
            self.discard(child);
        }
        Ok(())
    }

    /// Free a detached subtree, bumping each slot's generation
    fn discard(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };

            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            self.live -= 1;
            stack.extend(node.children);
        }
    }

    // === Structure ===

    /// True while the handle points at a live node, attached or not
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, the body included
    pub fn node_count(&self) -> usize {
        self.live
    }

    #[cfg(test)]
    pub(crate) fn slots_len(&self) -> usize {
        self.slots.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.get(id).map(|n| &n.data)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.data(id)? {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// True when the node is still reachable from the root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_inclusive_ancestor(self.root, id)
    }

    /// The node itself followed by its ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.contains(id).then_some(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Element descendants of `scope` in document order, excluding `scope` itself
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !self.is_element(id) {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        out
    }

    /// Equivalent of `scope.querySelectorAll('.class')`
    pub fn elements_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// Equivalent of `scope.querySelector('.class')`
    pub fn first_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.has_class(*id, class))
    }

    /// First connected element carrying `id="value"`
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.attribute(*id, "id") == Some(value))
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.data(current) {
                Some(NodeData::Text(text)) => out.push_str(text),
                Some(NodeData::Element { .. }) => {
                    stack.extend(self.children(current).iter().rev().copied());
                }
                None => {}
            }
        }
        out
    }

    // === Attributes ===

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let attributes = self.attributes_mut(id)?;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.attributes_mut(id)?.retain(|(key, _)| key != name);
        Ok(())
    }

    // === Class list ===
    //
    // Reflected through the `class` attribute, like `Element.classList`.

    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).contains(&class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.require_element(id)?;
        if self.has_class(id, class) {
            return Ok(());
        }

        let mut classes: Vec<String> = self.classes(id).into_iter().map(str::to_string).collect();
        classes.push(class.to_string());
        self.set_attribute(id, "class", &classes.join(" "))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.require_element(id)?;
        if !self.has_class(id, class) {
            return Ok(());
        }

        let remaining: Vec<String> = self
            .classes(id)
            .into_iter()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        self.set_attribute(id, "class", &remaining.join(" "))
    }

    // === Focus ===

    /// Move keyboard focus. Focusing a detached element is a no-op, as on the platform.
    pub fn focus(&mut self, id: NodeId) -> Result<()> {
        self.require_element(id)?;
        if !self.is_connected(id) {
            tracing::trace!(node = %id, "Ignoring focus on detached element");
            return Ok(());
        }
        self.focused = Some(id);
        Ok(())
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Parsed `tabindex`, falling back to 0 for natively focusable controls
    pub fn tab_index(&self, id: NodeId) -> Option<i32> {
        if let Some(value) = self.attribute(id, "tabindex") {
            return value.trim().parse().ok();
        }

        let tag = self.tag(id)?;
        let natively_focusable = NATIVELY_FOCUSABLE.contains(&tag)
            || (tag == "a" && self.attribute(id, "href").is_some());
        natively_focusable.then_some(0)
    }

    /// Order in which the Tab key visits connected elements:
    /// positive tabindex ascending, then tabindex 0 in document order.
    pub fn sequential_focus_order(&self) -> Vec<NodeId> {
        let mut positive = Vec::new();
        let mut zero = Vec::new();

        for id in self.descendants(self.root) {
            match self.tab_index(id) {
                Some(0) => zero.push(id),
                Some(n) if n > 0 => positive.push((n, id)),
                _ => {}
            }
        }

        positive.sort_by_key(|(n, _)| *n);
        positive.into_iter().map(|(_, id)| id).chain(zero).collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

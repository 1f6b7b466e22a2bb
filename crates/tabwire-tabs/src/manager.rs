//! Tab Group Manager
//!
//! Discovers tab group containers, wires them, and routes input to the
//! group a tab belongs to.

use std::collections::HashMap;

use tabwire_dom::{Document, NodeId};

use crate::error::TabError;
use crate::group::{GroupId, TabGroup};
use crate::ids::IdGenerator;
use crate::keyboard::{resolve_key, Key, KeyResolution};
use crate::markup::Markup;
use crate::selector::select;
use crate::state::SelectionState;
use crate::Result;

/// What a wired tab answers to: its group and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBinding {
    pub group: GroupId,
    pub index: usize,
}

/// Outcome of one initialization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Groups wired during this pass
    pub wired: Vec<GroupId>,
    /// Containers marked initialized but left unwired (no tablist, no tabs or no panels)
    pub skipped: Vec<NodeId>,
}

impl InitReport {
    pub fn is_empty(&self) -> bool {
        self.wired.is_empty() && self.skipped.is_empty()
    }
}

/// Outcome of a key press on a tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The browser default (scrolling, etc.) must be suppressed
    pub prevent_default: bool,
    /// Newly selected index, if the key moved the selection
    pub selected: Option<usize>,
}

#[derive(Debug, Default)]
struct ContainerState {
    /// Set when a pass has seen the container; cleared on navigation
    initialized: bool,
    /// Current wiring, if the container had usable structure
    group: Option<GroupId>,
}

#[derive(Debug)]
pub struct TabGroupManager {
    markup: Markup,
    ids: IdGenerator,
    next_group: u64,
    containers: HashMap<NodeId, ContainerState>,
    groups: HashMap<GroupId, TabGroup>,
    bindings: HashMap<NodeId, TabBinding>,
}

impl TabGroupManager {
    pub fn new(markup: Markup) -> Self {
        Self {
            markup,
            ids: IdGenerator::new(),
            next_group: 0,
            containers: HashMap::new(),
            groups: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Wire every container not yet initialized.
    ///
    /// Containers without usable structure are marked and skipped; nothing
    /// here fails the pass.
    pub fn initialize(&mut self, doc: &mut Document) -> InitReport {
        self.prune_detached(doc);

        let containers = doc.elements_by_class(doc.root(), &self.markup.container_class);
        let mut report = InitReport::default();

        for container in containers {
            let state = self.containers.entry(container).or_default();
            if state.initialized {
                continue;
            }
            state.initialized = true;

            if let Err(e) = doc.add_class(container, &self.markup.initialized_class) {
                tracing::warn!(container = %container, error = %e, "Failed to mark container");
            }

            match self.wire(doc, container) {
                Ok(Some(group)) => report.wired.push(group),
                Ok(None) => report.skipped.push(container),
                Err(e) => {
                    tracing::warn!(container = %container, error = %e, "Failed to wire tab group");
                    report.skipped.push(container);
                }
            }
        }

        tracing::info!(
            wired = report.wired.len(),
            skipped = report.skipped.len(),
            "Tab groups initialized"
        );

        report
    }

    fn wire(&mut self, doc: &mut Document, container: NodeId) -> Result<Option<GroupId>> {
        // A container is never wired twice at once
        self.unwire(container);

        let Some(tablist) = doc.first_by_class(container, &self.markup.tablist_class) else {
            tracing::debug!(container = %container, "No tablist, skipping container");
            return Ok(None);
        };

        let tabs = doc.elements_by_class(tablist, &self.markup.tab_class);
        let panels = doc.elements_by_class(container, &self.markup.panel_class);

        if tabs.is_empty() || panels.is_empty() {
            tracing::debug!(
                container = %container,
                tabs = tabs.len(),
                panels = panels.len(),
                "Empty tab group, skipping container"
            );
            return Ok(None);
        }

        doc.set_attribute(tablist, "role", "tablist")?;

        for (index, tab) in tabs.iter().enumerate() {
            let pair = self.ids.next_unused_pair(doc, index);
            let state = SelectionState::for_index(index, 0);

            doc.set_attribute(*tab, "role", "tab")?;
            doc.set_attribute(*tab, "id", &pair.tab)?;
            doc.set_attribute(*tab, "aria-controls", &pair.panel)?;
            doc.set_attribute(*tab, "tabindex", state.tab_index())?;

            // Tabs past the last panel keep an aria-controls with no target
            if let Some(panel) = panels.get(index) {
                doc.set_attribute(*panel, "role", "tabpanel")?;
                doc.set_attribute(*panel, "id", &pair.panel)?;
                doc.set_attribute(*panel, "aria-labelledby", &pair.tab)?;
                doc.set_attribute(*panel, "tabindex", "0")?;
            }
        }

        // Applies classes and aria-selected, and hides panels past the last tab
        select(doc, &self.markup, &tabs, &panels, 0)?;

        let id = GroupId(self.next_group);
        self.next_group += 1;

        for (index, tab) in tabs.iter().enumerate() {
            self.bindings.insert(*tab, TabBinding { group: id, index });
        }

        tracing::debug!(
            group = %id,
            container = %container,
            tabs = tabs.len(),
            panels = panels.len(),
            "Wired tab group"
        );

        self.groups.insert(
            id,
            TabGroup {
                id,
                container,
                tablist,
                tabs,
                panels,
                selected: 0,
            },
        );
        self.containers.entry(container).or_default().group = Some(id);

        Ok(Some(id))
    }

    /// Drop the current wiring of a container and every binding that points at it
    fn unwire(&mut self, container: NodeId) {
        let previous = self
            .containers
            .get_mut(&container)
            .and_then(|state| state.group.take());

        if let Some(group) = previous {
            self.groups.remove(&group);
            self.bindings.retain(|_, binding| binding.group != group);
            tracing::debug!(group = %group, container = %container, "Unwired tab group");
        }
    }

    /// Forget every initialized marker so the next pass rewires all containers
    pub fn clear_initialized(&mut self, doc: &mut Document) {
        for state in self.containers.values_mut() {
            state.initialized = false;
        }

        for element in doc.elements_by_class(doc.root(), &self.markup.initialized_class) {
            if let Err(e) = doc.remove_class(element, &self.markup.initialized_class) {
                tracing::warn!(container = %element, error = %e, "Failed to clear marker");
            }
        }
    }

    /// Drop state for containers and tabs no longer attached to the document
    pub fn prune_detached(&mut self, doc: &Document) {
        let before = self.groups.len();

        self.containers
            .retain(|container, _| doc.is_connected(*container));
        self.groups.retain(|_, group| group.is_live(doc));

        let groups = &self.groups;
        self.bindings
            .retain(|tab, binding| groups.contains_key(&binding.group) && doc.is_connected(*tab));

        let dropped = before - self.groups.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Pruned detached tab groups");
        }
    }

    // === Input ===

    /// Binding of the tab that `target` is, or is inside of
    pub fn binding_for(&self, doc: &Document, target: NodeId) -> Option<TabBinding> {
        doc.ancestors(target)
            .into_iter()
            .find_map(|node| self.bindings.get(&node).copied())
    }

    /// Pointer activation: select the bound tab. Focus is left to the platform.
    pub fn activate(&mut self, doc: &mut Document, binding: TabBinding) -> Result<()> {
        let group = self
            .groups
            .get_mut(&binding.group)
            .ok_or_else(|| TabError::GroupNotFound(binding.group.to_string()))?;

        select(doc, &self.markup, &group.tabs, &group.panels, binding.index)?;
        group.selected = binding.index;

        Ok(())
    }

    /// Key press on the bound tab: move selection and focus per the navigation table
    pub fn handle_key(
        &mut self,
        doc: &mut Document,
        binding: TabBinding,
        key: &Key,
    ) -> Result<KeyOutcome> {
        let group = self
            .groups
            .get_mut(&binding.group)
            .ok_or_else(|| TabError::GroupNotFound(binding.group.to_string()))?;

        match resolve_key(key, binding.index, group.len()) {
            KeyResolution::Ignore => Ok(KeyOutcome::default()),
            KeyResolution::Move(next) => {
                select(doc, &self.markup, &group.tabs, &group.panels, next)?;
                group.selected = next;

                if let Some(tab) = group.tab(next) {
                    doc.focus(tab)?;
                }

                tracing::debug!(group = %binding.group, key = %key, from = binding.index, to = next, "Keyboard navigation");

                Ok(KeyOutcome {
                    prevent_default: true,
                    selected: Some(next),
                })
            }
        }
    }

    // === Queries ===

    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.get(&id)
    }

    /// Live groups ordered by when they were wired
    pub fn groups(&self) -> Vec<&TabGroup> {
        let mut groups: Vec<&TabGroup> = self.groups.values().collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    pub fn group_for_container(&self, container: NodeId) -> Option<&TabGroup> {
        self.containers
            .get(&container)
            .and_then(|state| state.group)
            .and_then(|id| self.groups.get(&id))
    }

    pub fn is_initialized(&self, container: NodeId) -> bool {
        self.containers
            .get(&container)
            .is_some_and(|state| state.initialized)
    }
}

impl Default for TabGroupManager {
    fn default() -> Self {
        Self::new(Markup::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_TABS: &str = r##"<div class="tabs"><ul class="tablist"><li class="tab"><a href="#a">A</a></li><li class="tab">B</li><li class="tab">C</li></ul><div class="tabpanel">1</div><div class="tabpanel">2</div><div class="tabpanel">3</div></div>"##;

    fn wired(html: &str) -> (Document, TabGroupManager, InitReport) {
        let mut doc = Document::parse_html(html);
        let mut manager = TabGroupManager::default();
        let report = manager.initialize(&mut doc);
        (doc, manager, report)
    }

    fn selected_indices(doc: &Document, nodes: &[NodeId]) -> Vec<usize> {
        nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| doc.has_class(**n, "is-selected"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_initialize_wires_aria() {
        let (doc, manager, report) = wired(THREE_TABS);
        assert_eq!(report.wired.len(), 1);

        let group = manager.group(report.wired[0]).unwrap();
        assert_eq!(doc.attribute(group.tablist, "role"), Some("tablist"));
        assert!(doc.has_class(group.container, "tabs-initialized"));

        for (i, tab) in group.tabs.iter().enumerate() {
            let panel = group.panel_for(i).unwrap();
            let tab_id = doc.attribute(*tab, "id").unwrap();
            let panel_id = doc.attribute(panel, "id").unwrap();

            assert_eq!(doc.attribute(*tab, "role"), Some("tab"));
            assert_eq!(doc.attribute(*tab, "aria-controls"), Some(panel_id));
            assert_eq!(doc.attribute(panel, "role"), Some("tabpanel"));
            assert_eq!(doc.attribute(panel, "aria-labelledby"), Some(tab_id));
            assert_eq!(doc.attribute(panel, "tabindex"), Some("0"));
        }

        assert_eq!(selected_indices(&doc, &group.tabs), vec![0]);
        assert_eq!(selected_indices(&doc, &group.panels), vec![0]);
        assert_eq!(doc.attribute(group.tabs[0], "aria-selected"), Some("true"));
        assert_eq!(doc.attribute(group.tabs[1], "tabindex"), Some("-1"));
        assert!(doc.has_class(group.panels[2], "is-hidden"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let (mut doc, mut manager, first) = wired(THREE_TABS);
        let before = doc.to_html();

        let second = manager.initialize(&mut doc);

        assert!(second.is_empty());
        assert_eq!(doc.to_html(), before);
        assert_eq!(manager.groups().len(), 1);
        assert_eq!(manager.groups()[0].id, first.wired[0]);
    }

    #[test]
    fn test_missing_tablist_skipped() {
        let (doc, manager, report) =
            wired(r#"<div class="tabs"><div class="tab">A</div><div class="tabpanel">1</div></div>"#);

        assert!(report.wired.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(manager.is_initialized(report.skipped[0]));

        let tab = doc.first_by_class(doc.root(), "tab").unwrap();
        assert_eq!(doc.attribute(tab, "role"), None);
    }

    #[test]
    fn test_zero_tabs_leaves_panels_untouched() {
        let (doc, _, report) = wired(
            r#"<div class="tabs"><ul class="tablist"></ul><div class="tabpanel">1</div><div class="tabpanel">2</div></div>"#,
        );

        assert!(report.wired.is_empty());
        for panel in doc.elements_by_class(doc.root(), "tabpanel") {
            assert_eq!(doc.attribute(panel, "role"), None);
            assert!(!doc.has_class(panel, "is-selected"));
            assert!(!doc.has_class(panel, "is-hidden"));
        }
        let tablist = doc.first_by_class(doc.root(), "tablist").unwrap();
        assert_eq!(doc.attribute(tablist, "role"), None);
    }

    #[test]
    fn test_zero_panels_skipped() {
        let (doc, _, report) = wired(
            r#"<div class="tabs"><ul class="tablist"><li class="tab">A</li></ul></div>"#,
        );

        assert!(report.wired.is_empty());
        let tab = doc.first_by_class(doc.root(), "tab").unwrap();
        assert_eq!(doc.attribute(tab, "tabindex"), None);
    }

    #[test]
    fn test_extra_tabs_and_panels() {
        let (doc, manager, report) = wired(
            r#"<div class="tabs"><ul class="tablist"><li class="tab">A</li><li class="tab">B</li><li class="tab">C</li></ul><div class="tabpanel">1</div><div class="tabpanel">2</div></div>
               <div class="tabs"><ul class="tablist"><li class="tab">A</li></ul><div class="tabpanel">1</div><div class="tabpanel">2</div></div>"#,
        );
        assert_eq!(report.wired.len(), 2);

        let more_tabs = manager.group(report.wired[0]).unwrap();
        let controls = doc.attribute(more_tabs.tabs[2], "aria-controls").unwrap();
        assert!(doc.element_by_id(controls).is_none());

        let more_panels = manager.group(report.wired[1]).unwrap();
        let orphan = more_panels.orphan_panels()[0];
        assert_eq!(doc.attribute(orphan, "role"), None);
        assert!(doc.has_class(orphan, "is-hidden"));
    }

    #[test]
    fn test_ids_unique_across_groups() {
        let html = format!("{}{}", THREE_TABS, THREE_TABS);
        let (doc, _, report) = wired(&html);
        assert_eq!(report.wired.len(), 2);

        let mut ids: Vec<&str> = doc
            .descendants(doc.root())
            .into_iter()
            .filter_map(|n| doc.attribute(n, "id"))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(total, 12);
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_activate_from_child_element() {
        let (mut doc, mut manager, report) = wired(THREE_TABS);
        let group = manager.group(report.wired[0]).unwrap().clone();

        // The link inside tab A routes to tab A
        let link = doc.children(group.tabs[0])[0];
        assert_eq!(
            manager.binding_for(&doc, link),
            Some(TabBinding { group: group.id, index: 0 })
        );

        let binding = manager.binding_for(&doc, group.tabs[2]).unwrap();
        manager.activate(&mut doc, binding).unwrap();

        assert_eq!(manager.group(group.id).unwrap().selected, 2);
        assert_eq!(selected_indices(&doc, &group.panels), vec![2]);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_binding_for_unrelated_node() {
        let (doc, manager, report) = wired(THREE_TABS);
        let group = manager.group(report.wired[0]).unwrap();
        assert_eq!(manager.binding_for(&doc, group.panels[0]), None);
        assert_eq!(manager.binding_for(&doc, doc.root()), None);
    }

    #[test]
    fn test_handle_key_moves_focus() {
        let (mut doc, mut manager, report) = wired(THREE_TABS);
        let group = manager.group(report.wired[0]).unwrap().clone();

        let outcome = manager
            .handle_key(&mut doc, TabBinding { group: group.id, index: 0 }, &Key::ArrowLeft)
            .unwrap();

        assert_eq!(
            outcome,
            KeyOutcome {
                prevent_default: true,
                selected: Some(2)
            }
        );
        assert_eq!(doc.focused(), Some(group.tabs[2]));
        assert_eq!(selected_indices(&doc, &group.tabs), vec![2]);
        let reachable: Vec<NodeId> = doc
            .sequential_focus_order()
            .into_iter()
            .filter(|n| group.tabs.contains(n))
            .collect();
        assert_eq!(reachable, vec![group.tabs[2]]);
    }

    #[test]
    fn test_handle_other_key() {
        let (mut doc, mut manager, report) = wired(THREE_TABS);
        let group = report.wired[0];
        let before = doc.to_html();

        let outcome = manager
            .handle_key(
                &mut doc,
                TabBinding { group, index: 1 },
                &Key::from_dom("Enter"),
            )
            .unwrap();

        assert_eq!(outcome, KeyOutcome::default());
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_clear_and_rewire() {
        let (mut doc, mut manager, first) = wired(THREE_TABS);
        let old = manager.group(first.wired[0]).unwrap().clone();
        manager
            .activate(&mut doc, TabBinding { group: old.id, index: 1 })
            .unwrap();
        let old_id = doc.attribute(old.tabs[0], "id").unwrap().to_string();

        manager.clear_initialized(&mut doc);
        assert!(!manager.is_initialized(old.container));
        assert!(!doc.has_class(old.container, "tabs-initialized"));

        let second = manager.initialize(&mut doc);
        assert_eq!(second.wired.len(), 1);
        assert_ne!(second.wired[0], old.id);
        assert!(manager.group(old.id).is_none());

        let group = manager.group(second.wired[0]).unwrap();
        assert_eq!(group.selected, 0);
        assert_eq!(selected_indices(&doc, &group.tabs), vec![0]);
        assert_eq!(selected_indices(&doc, &group.panels), vec![0]);
        assert_ne!(doc.attribute(group.tabs[0], "id"), Some(old_id.as_str()));

        // Old bindings were replaced, not duplicated
        assert_eq!(
            manager.binding_for(&doc, group.tabs[1]).map(|b| b.group),
            Some(group.id)
        );
    }

    #[test]
    fn test_prune_detached() {
        let (mut doc, mut manager, report) = wired(THREE_TABS);
        let group = manager.group(report.wired[0]).unwrap().clone();

        doc.remove_children(doc.root()).unwrap();
        manager.prune_detached(&doc);

        assert!(manager.groups().is_empty());
        assert_eq!(manager.binding_for(&doc, group.tabs[0]), None);
        assert!(!manager.is_initialized(group.container));
    }

    #[test]
    fn test_custom_markup() {
        let markup = Markup {
            container_class: "tab-set".to_string(),
            tab_class: "trigger".to_string(),
            ..Markup::default()
        };
        let mut doc = Document::parse_html(
            r#"<div class="tab-set"><div class="tablist"><button class="trigger">A</button><button class="trigger">B</button></div><div class="tabpanel">1</div><div class="tabpanel">2</div></div>"#,
        );
        let mut manager = TabGroupManager::new(markup);

        let report = manager.initialize(&mut doc);

        assert_eq!(report.wired.len(), 1);
        assert_eq!(manager.group(report.wired[0]).unwrap().len(), 2);
    }
}

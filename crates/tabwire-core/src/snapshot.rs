//! Accessibility view of wired tab groups

use serde::Serialize;
use tabwire_dom::{Document, NodeId};
use tabwire_tabs::{GroupId, Markup, TabGroup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabSnapshot {
    pub id: Option<String>,
    /// Visible label, whitespace collapsed
    pub label: String,
    pub controls: Option<String>,
    pub aria_selected: Option<String>,
    pub tab_index: Option<i32>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    pub id: Option<String>,
    pub labelled_by: Option<String>,
    pub selected: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot {
    pub group: GroupId,
    pub selected: usize,
    pub tabs: Vec<TabSnapshot>,
    pub panels: Vec<PanelSnapshot>,
}

impl GroupSnapshot {
    pub fn capture(doc: &Document, markup: &Markup, group: &TabGroup) -> Self {
        Self {
            group: group.id,
            selected: group.selected,
            tabs: group
                .tabs
                .iter()
                .map(|tab| TabSnapshot {
                    id: owned_attribute(doc, *tab, "id"),
                    label: normalize_whitespace(&doc.text_content(*tab)),
                    controls: owned_attribute(doc, *tab, "aria-controls"),
                    aria_selected: owned_attribute(doc, *tab, "aria-selected"),
                    tab_index: doc.tab_index(*tab),
                    selected: doc.has_class(*tab, &markup.selected_class),
                })
                .collect(),
            panels: group
                .panels
                .iter()
                .map(|panel| PanelSnapshot {
                    id: owned_attribute(doc, *panel, "id"),
                    labelled_by: owned_attribute(doc, *panel, "aria-labelledby"),
                    selected: doc.has_class(*panel, &markup.selected_class),
                    hidden: doc.has_class(*panel, &markup.hidden_class),
                })
                .collect(),
        }
    }

    pub fn selected_tabs(&self) -> usize {
        self.tabs.iter().filter(|t| t.selected).count()
    }

    pub fn selected_panels(&self) -> usize {
        self.panels.iter().filter(|p| p.selected).count()
    }
}

fn owned_attribute(doc: &Document, node: NodeId, name: &str) -> Option<String> {
    doc.attribute(node, name).map(str::to_string)
}

/// Collapse runs of whitespace the way a rendered label reads
fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Tab\n   One  "), "Tab One");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("\t Step\u{a0}2 "), "Step 2");
    }
}

//! Selector: applies the exactly-one-selected rule to a group

use tabwire_dom::{Document, NodeId};

use crate::error::TabError;
use crate::markup::Markup;
use crate::state::SelectionState;
use crate::Result;

/// Select the tab at `target` and its panel, deselecting every other pair.
///
/// Panels are matched to tabs by position; panels past the last tab are
/// always hidden. Keyboard focus is left alone. An out-of-range `target`
/// changes nothing.
pub fn select(
    doc: &mut Document,
    markup: &Markup,
    tabs: &[NodeId],
    panels: &[NodeId],
    target: usize,
) -> Result<()> {
    if target >= tabs.len() {
        return Err(TabError::IndexOutOfRange {
            index: target,
            len: tabs.len(),
        });
    }

    for (index, tab) in tabs.iter().enumerate() {
        let state = SelectionState::for_index(index, target);
        if state.is_selected() {
            doc.add_class(*tab, &markup.selected_class)?;
        } else {
            doc.remove_class(*tab, &markup.selected_class)?;
        }
        doc.set_attribute(*tab, "tabindex", state.tab_index())?;
        doc.set_attribute(*tab, "aria-selected", state.aria_selected())?;
    }

    for (index, panel) in panels.iter().enumerate() {
        if SelectionState::for_index(index, target).is_selected() {
            doc.remove_class(*panel, &markup.hidden_class)?;
            doc.add_class(*panel, &markup.selected_class)?;
        } else {
            doc.add_class(*panel, &markup.hidden_class)?;
            doc.remove_class(*panel, &markup.selected_class)?;
        }
    }

    tracing::debug!(target, tabs = tabs.len(), panels = panels.len(), "Tab selected");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(tab_count: usize, panel_count: usize) -> (Document, Vec<NodeId>, Vec<NodeId>) {
        let mut html = String::from(r#"<div class="tabs"><ul class="tablist">"#);
        for i in 0..tab_count {
            html.push_str(&format!(r#"<li class="tab">Tab {}</li>"#, i));
        }
        html.push_str("</ul>");
        for i in 0..panel_count {
            html.push_str(&format!(r#"<div class="tabpanel">Panel {}</div>"#, i));
        }
        html.push_str("</div>");

        let doc = Document::parse_html(&html);
        let tabs = doc.elements_by_class(doc.root(), "tab");
        let panels = doc.elements_by_class(doc.root(), "tabpanel");
        (doc, tabs, panels)
    }

    fn selected(doc: &Document, nodes: &[NodeId]) -> Vec<usize> {
        nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| doc.has_class(**n, "is-selected"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_exactly_one_selected() {
        let markup = Markup::default();
        let (mut doc, tabs, panels) = fixture(4, 4);

        for target in 0..tabs.len() {
            select(&mut doc, &markup, &tabs, &panels, target).unwrap();
            assert_eq!(selected(&doc, &tabs), vec![target]);
            assert_eq!(selected(&doc, &panels), vec![target]);

            for (i, panel) in panels.iter().enumerate() {
                // Never both hidden and selected, never both visible and unselected
                assert_ne!(
                    doc.has_class(*panel, "is-hidden"),
                    doc.has_class(*panel, "is-selected"),
                    "panel {} inconsistent",
                    i
                );
            }
        }
    }

    #[test]
    fn test_roving_tabindex() {
        let markup = Markup::default();
        let (mut doc, tabs, panels) = fixture(3, 3);

        select(&mut doc, &markup, &tabs, &panels, 1).unwrap();

        assert_eq!(doc.attribute(tabs[0], "tabindex"), Some("-1"));
        assert_eq!(doc.attribute(tabs[1], "tabindex"), Some("0"));
        assert_eq!(doc.attribute(tabs[2], "tabindex"), Some("-1"));
        assert_eq!(doc.attribute(tabs[1], "aria-selected"), Some("true"));
        assert_eq!(doc.attribute(tabs[2], "aria-selected"), Some("false"));
        assert_eq!(doc.sequential_focus_order(), vec![tabs[1]]);
    }

    #[test]
    fn test_idempotent() {
        let markup = Markup::default();
        let (mut doc, tabs, panels) = fixture(3, 3);

        select(&mut doc, &markup, &tabs, &panels, 2).unwrap();
        let once = doc.to_html();
        select(&mut doc, &markup, &tabs, &panels, 2).unwrap();

        assert_eq!(doc.to_html(), once);
    }

    #[test]
    fn test_out_of_range_changes_nothing() {
        let markup = Markup::default();
        let (mut doc, tabs, panels) = fixture(2, 2);
        let before = doc.to_html();

        let result = select(&mut doc, &markup, &tabs, &panels, 2);

        assert_eq!(result, Err(TabError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn test_extra_panels_stay_hidden() {
        let markup = Markup::default();
        let (mut doc, tabs, panels) = fixture(2, 3);

        for target in 0..tabs.len() {
            select(&mut doc, &markup, &tabs, &panels, target).unwrap();
            assert!(doc.has_class(panels[2], "is-hidden"));
        }
    }

    #[test]
    fn test_extra_tabs_select_without_panel() {
        let markup = Markup::default();
        let (mut doc, tabs, panels) = fixture(3, 2);

        select(&mut doc, &markup, &tabs, &panels, 2).unwrap();

        assert_eq!(selected(&doc, &tabs), vec![2]);
        assert!(selected(&doc, &panels).is_empty());
        assert!(panels.iter().all(|p| doc.has_class(*p, "is-hidden")));
    }
}

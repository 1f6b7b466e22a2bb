//! HTML loading and serialization

use scraper::{ElementRef, Html, Node};

use crate::document::Document;
use crate::node::{NodeData, NodeId};
use crate::Result;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is emitted verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl Document {
    /// Build a document whose body holds the parsed fragment
    pub fn parse_html(html: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root();
        // A fresh root has no children to replace, so this cannot fail
        if let Err(e) = doc.set_inner_html(root, html) {
            tracing::warn!(error = %e, "Failed to load markup into new document");
        }
        doc
    }

    /// Replace the children of `parent` with the parsed fragment.
    ///
    /// The previous children are discarded, so their handles go stale.
    pub fn set_inner_html(&mut self, parent: NodeId, html: &str) -> Result<()> {
        self.clear_children(parent)?;

        let fragment = Html::parse_fragment(html);
        self.import_children(parent, fragment.root_element())?;

        tracing::trace!(parent = %parent, bytes = html.len(), "Loaded markup fragment");
        Ok(())
    }

    fn import_children(&mut self, parent: NodeId, source: ElementRef<'_>) -> Result<()> {
        for child in source.children() {
            if let Some(element) = ElementRef::wrap(child) {
                let value = element.value();
                let id = self.create_element(value.name());
                for (name, attr) in value.attrs() {
                    self.set_attribute(id, name, attr)?;
                }
                self.append_child(parent, id)?;
                self.import_children(id, element)?;
            } else if let Node::Text(text) = child.value() {
                let content: &str = text;
                let id = self.create_text(content);
                self.append_child(parent, id)?;
            }
            // Comments, doctypes and processing instructions carry nothing we need
        }
        Ok(())
    }

    /// Serialize the body's children
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self.tag(id).is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
        for child in self.children(id) {
            self.write_node(*child, raw, &mut out);
        }
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, raw_text: bool, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Text(text)) => {
                if raw_text {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            Some(NodeData::Element { tag, attributes }) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }

                out.push_str(&self.inner_html(id));
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            None => {}
        }
    }
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

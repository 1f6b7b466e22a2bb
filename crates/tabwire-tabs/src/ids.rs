//! Identifier generation for tab/panel pairs

use tabwire_dom::Document;

/// Ids written onto one tab and its panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPair {
    pub tab: String,
    pub panel: String,
}

/// Per-document monotonic counter.
///
/// Every pair gets its own sequence number, so ids never repeat within a
/// document session, including across re-initialization passes.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next pair for the tab at `index`: `tab-<seq>-<index>` / `panel-<seq>-<index>`
    fn next_pair(&mut self, index: usize) -> IdPair {
        let seq = self.next;
        self.next += 1;

        IdPair {
            tab: format!("tab-{}-{}", seq, index),
            panel: format!("panel-{}-{}", seq, index),
        }
    }

    /// Like [`Self::next_pair`], skipping sequence numbers whose ids the author already used
    pub fn next_unused_pair(&mut self, doc: &Document, index: usize) -> IdPair {
        loop {
            let pair = self.next_pair(index);
            if doc.element_by_id(&pair.tab).is_none() && doc.element_by_id(&pair.panel).is_none() {
                return pair;
            }
            tracing::debug!(tab_id = %pair.tab, "Generated id already in document, skipping");
        }
    }
}

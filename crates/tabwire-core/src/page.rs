//! Page host
//!
//! Owns the document and the tab groups wired into it, and translates host
//! page signals (ready, load, router navigation, clicks, key presses) into
//! widget operations. Nothing here returns an error to the event source:
//! failures are logged and the event is treated as unhandled.

use parking_lot::RwLock;
use std::sync::Arc;
use url::Url;

use tabwire_dom::{Document, NodeId};
use tabwire_tabs::{InitReport, TabGroupManager};

use crate::config::Config;
use crate::event::{Event, EventOutcome, Lifecycle, ReadyState};
use crate::snapshot::GroupSnapshot;
use crate::Result;

pub struct Page {
    /// Configuration
    config: Arc<Config>,
    /// Live document
    document: Arc<RwLock<Document>>,
    /// Wired tab groups and their bindings
    tabs: Arc<RwLock<TabGroupManager>>,
    /// Last known `document.readyState`
    ready_state: Arc<RwLock<ReadyState>>,
    /// Address of the page currently shown
    url: Arc<RwLock<Option<Url>>>,
}

impl Page {
    pub fn new(config: Config, document: Document) -> Self {
        let tabs = TabGroupManager::new(config.markup.clone());

        Self {
            config: Arc::new(config),
            document: Arc::new(RwLock::new(document)),
            tabs: Arc::new(RwLock::new(tabs)),
            ready_state: Arc::new(RwLock::new(ReadyState::Loading)),
            url: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_html(config: Config, html: &str) -> Self {
        Self::new(config, Document::parse_html(html))
    }

    /// Entry point for a host page: set up logging from the config's filter,
    /// load the markup and attach at the given ready state.
    pub fn install(config: Config, html: &str, ready_state: ReadyState) -> Self {
        crate::init_logging(&config.log_filter);

        let page = Self::from_html(config, html);
        page.attach(ready_state);
        page
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ready_state(&self) -> ReadyState {
        *self.ready_state.read()
    }

    pub fn url(&self) -> Option<Url> {
        self.url.read().clone()
    }

    // === Lifecycle ===

    /// Install the widget. Initializes right away unless the document is
    /// still loading, in which case `DOMContentLoaded` will do it.
    pub fn attach(&self, ready_state: ReadyState) -> Option<InitReport> {
        *self.ready_state.write() = ready_state;

        if ready_state == ReadyState::Loading {
            tracing::debug!("Document still loading, deferring tab initialization");
            return None;
        }

        Some(self.initialize())
    }

    /// Run one initialization pass over containers not yet wired
    pub fn initialize(&self) -> InitReport {
        let mut doc = self.document.write();
        self.tabs.write().initialize(&mut doc)
    }

    pub fn handle_lifecycle(&self, hook: Lifecycle) -> InitReport {
        match hook {
            Lifecycle::DomContentLoaded => {
                *self.ready_state.write() = ReadyState::Interactive;
                self.initialize()
            }
            Lifecycle::Load => {
                *self.ready_state.write() = ReadyState::Complete;
                self.initialize()
            }
            Lifecycle::Navigated => {
                let mut doc = self.document.write();
                let mut tabs = self.tabs.write();
                tabs.clear_initialized(&mut doc);
                tabs.initialize(&mut doc)
            }
        }
    }

    /// Map a DOM event name to its lifecycle hook
    pub fn lifecycle_for(&self, name: &str) -> Option<Lifecycle> {
        match name {
            "DOMContentLoaded" => Some(Lifecycle::DomContentLoaded),
            "load" => Some(Lifecycle::Load),
            _ if name == self.config.navigation_event => Some(Lifecycle::Navigated),
            _ => None,
        }
    }

    /// Deliver a named document/window event. Names the widget does not listen to are ignored.
    pub fn fire(&self, name: &str) -> Option<InitReport> {
        match self.lifecycle_for(name) {
            Some(hook) => Some(self.handle_lifecycle(hook)),
            None => {
                tracing::trace!(event = %name, "Ignoring unrelated event");
                None
            }
        }
    }

    /// Swap in a new page the way the site router does, then signal navigation
    pub fn navigate(&self, url: &str, html: &str) -> Result<InitReport> {
        let url = Url::parse(url)?;

        {
            let mut doc = self.document.write();
            let root = doc.root();
            doc.set_inner_html(root, html)?;
            self.tabs.write().prune_detached(&doc);
        }

        tracing::info!(url = %url, "Page navigated");
        *self.url.write() = Some(url);

        Ok(self.handle_lifecycle(Lifecycle::Navigated))
    }

    // === Input ===

    /// Deliver an event to its target, bubbling up to the tab it is inside of
    pub fn dispatch(&self, event: &Event) -> EventOutcome {
        let mut doc = self.document.write();
        let mut tabs = self.tabs.write();

        let Some(binding) = tabs.binding_for(&doc, event.target()) else {
            return EventOutcome::default();
        };

        match event {
            Event::Click { .. } => {
                // The tab owns the click even if selection fails
                let handled = match tabs.activate(&mut doc, binding) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(group = %binding.group, error = %e, "Tab activation failed");
                        false
                    }
                };
                EventOutcome {
                    handled,
                    default_prevented: true,
                }
            }
            Event::KeyDown { key, .. } => match tabs.handle_key(&mut doc, binding, key) {
                Ok(outcome) => EventOutcome {
                    handled: outcome.selected.is_some(),
                    default_prevented: outcome.prevent_default,
                },
                Err(e) => {
                    tracing::warn!(group = %binding.group, key = %key, error = %e, "Key handling failed");
                    EventOutcome::default()
                }
            },
        }
    }

    /// Pointer click as the platform performs it: focus follows the click to the
    /// nearest focusable ancestor, then the click event is dispatched.
    pub fn click(&self, target: NodeId) -> EventOutcome {
        {
            let mut doc = self.document.write();
            let focusable = doc
                .ancestors(target)
                .into_iter()
                .find(|node| doc.tab_index(*node).is_some());
            if let Some(node) = focusable {
                if let Err(e) = doc.focus(node) {
                    tracing::warn!(node = %node, error = %e, "Failed to focus clicked element");
                }
            }
        }

        self.dispatch(&Event::click(target))
    }

    /// Key press delivered to whichever element holds focus
    pub fn press_key(&self, key: &str) -> EventOutcome {
        match self.focused() {
            Some(target) => self.dispatch(&Event::key_down(target, key)),
            None => EventOutcome::default(),
        }
    }

    pub fn focus(&self, target: NodeId) -> Result<()> {
        Ok(self.document.write().focus(target)?)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.document.read().focused()
    }

    // === Inspection ===

    pub fn with_document<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Document) -> T,
    {
        f(&*self.document.read())
    }

    /// Current ARIA state of every live group, in wiring order
    pub fn snapshot(&self) -> Vec<GroupSnapshot> {
        let doc = self.document.read();
        let tabs = self.tabs.read();
        tabs.groups()
            .into_iter()
            .filter(|group| group.is_live(&doc))
            .map(|group| GroupSnapshot::capture(&doc, tabs.markup(), group))
            .collect()
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn to_html(&self) -> String {
        self.document.read().to_html()
    }
}

impl Clone for Page {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            document: Arc::clone(&self.document),
            tabs: Arc::clone(&self.tabs),
            ready_state: Arc::clone(&self.ready_state),
            url: Arc::clone(&self.url),
        }
    }
}

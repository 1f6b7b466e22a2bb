//! Widget configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tabwire_tabs::Markup;

use crate::error::CoreError;
use crate::Result;

/// Event the documentation site's router emits after swapping page content
pub const DEFAULT_NAVIGATION_EVENT: &str = "antora:page:loaded";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class names for containers, tabs, panels and state markers
    pub markup: Markup,
    /// Custom event name that triggers a clear-and-reinitialize pass
    pub navigation_event: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.navigation_event.trim().is_empty() {
            return Err(CoreError::Config(
                "navigation_event cannot be empty".to_string(),
            ));
        }

        let markup = &self.markup;
        let classes = [
            ("container_class", &markup.container_class),
            ("initialized_class", &markup.initialized_class),
            ("tablist_class", &markup.tablist_class),
            ("tab_class", &markup.tab_class),
            ("panel_class", &markup.panel_class),
            ("selected_class", &markup.selected_class),
            ("hidden_class", &markup.hidden_class),
        ];
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (field, class) in classes {
            if class.is_empty() || class.contains(char::is_whitespace) {
                return Err(CoreError::Config(format!(
                    "{} must be a single class name, got {:?}",
                    field, class
                )));
            }

            // A shared name would make one marker read as another
            if let Some(other) = seen.insert(class.as_str(), field) {
                return Err(CoreError::Config(format!(
                    "{} and {} both use class {:?}",
                    other, field, class
                )));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markup: Markup::default(),
            navigation_event: DEFAULT_NAVIGATION_EVENT.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

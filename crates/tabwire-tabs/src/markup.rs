//! Class vocabulary shared with the site stylesheet

use serde::{Deserialize, Serialize};

/// Class names the widget looks for and writes.
///
/// Defaults match the documentation UI bundle; sites with their own
/// stylesheet can rename any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markup {
    /// Marks a tab group container
    pub container_class: String,
    /// Written onto containers once wired
    pub initialized_class: String,
    /// Marks the element holding the tabs
    pub tablist_class: String,
    /// Marks each tab trigger
    pub tab_class: String,
    /// Marks each content panel
    pub panel_class: String,
    /// Written onto the selected tab and panel
    pub selected_class: String,
    /// Written onto every panel that is not selected
    pub hidden_class: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            container_class: "tabs".to_string(),
            initialized_class: "tabs-initialized".to_string(),
            tablist_class: "tablist".to_string(),
            tab_class: "tab".to_string(),
            panel_class: "tabpanel".to_string(),
            selected_class: "is-selected".to_string(),
            hidden_class: "is-hidden".to_string(),
        }
    }
}

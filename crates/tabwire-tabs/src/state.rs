//! Selection state of a tab or panel
//!
//! ```text
//! Tab:   Selected   -> .is-selected, tabindex="0",  aria-selected="true"
//!        Unselected -> tabindex="-1", aria-selected="false"
//! Panel: Selected   -> .is-selected
//!        Unselected -> .is-hidden
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// The tab is active and its panel is visible
    Selected,
    /// The tab is out of the tab order and its panel is hidden
    Unselected,
}

impl SelectionState {
    /// State of position `index` when `target` is the selected position
    pub fn for_index(index: usize, target: usize) -> Self {
        if index == target {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::Selected)
    }

    /// Value of `aria-selected` on a tab
    pub fn aria_selected(&self) -> &'static str {
        match self {
            SelectionState::Selected => "true",
            SelectionState::Unselected => "false",
        }
    }

    /// Value of `tabindex` on a tab (roving tabindex)
    pub fn tab_index(&self) -> &'static str {
        match self {
            SelectionState::Selected => "0",
            SelectionState::Unselected => "-1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionState::Selected => "selected",
            SelectionState::Unselected => "unselected",
        }
    }
}

impl std::fmt::Display for SelectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SelectionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "selected" | "true" => Ok(SelectionState::Selected),
            "unselected" | "false" => Ok(SelectionState::Unselected),
            _ => Err(format!("Unknown selection state: {}", s)),
        }
    }
}

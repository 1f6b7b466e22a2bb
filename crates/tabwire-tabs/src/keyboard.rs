//! Keyboard navigation within a tab group
//!
//! One state per tab index, current state = index of the focused tab:
//! 1. Right / Down → next tab, wrapping to the first
//! 2. Left / Up → previous tab, wrapping to the last
//! 3. Home / End → first / last tab
//! 4. Anything else → no transition, browser default kept

/// A key press, named as in `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    ArrowUp,
    Home,
    End,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value, accepting the legacy `Left`/`Right`/`Up`/`Down` names
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Home" => Key::Home,
            "End" => Key::End,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Key::ArrowRight => "ArrowRight",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowUp => "ArrowUp",
            Key::Home => "Home",
            Key::End => "End",
            Key::Other(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of resolving a key press against the focused tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResolution {
    /// Select this index, move focus there, and suppress the browser default
    Move(usize),
    /// Not a navigation key; leave the event alone
    Ignore,
}

/// Resolve `key` pressed while the tab at `current` of `len` tabs has focus
pub fn resolve_key(key: &Key, current: usize, len: usize) -> KeyResolution {
    if len == 0 || current >= len {
        return KeyResolution::Ignore;
    }

    match key {
        Key::ArrowRight | Key::ArrowDown => KeyResolution::Move((current + 1) % len),
        Key::ArrowLeft | Key::ArrowUp => KeyResolution::Move((current + len - 1) % len),
        Key::Home => KeyResolution::Move(0),
        Key::End => KeyResolution::Move(len - 1),
        Key::Other(_) => KeyResolution::Ignore,
    }
}

//! Keys the autocomplete reacts to

/// A key press delivered to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other(String),
}

impl From<&str> for Key {
    /// Map a DOM `KeyboardEvent.key` name
    fn from(name: &str) -> Self {
        match name {
            "Tab" => Key::Tab,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Whether the host should run its default action for the key
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the key through (focus traversal, typing)
    Default,
    /// Swallow the key (no caret move, no form submit)
    PreventDefault,
}

impl KeyOutcome {
    pub fn default_prevented(self) -> bool {
        self == KeyOutcome::PreventDefault
    }
}

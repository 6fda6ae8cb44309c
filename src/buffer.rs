//! Shared notation buffer
//!
//! The text the user types and the keyboard appends to. The UI layer owns it
//! and lends it to the keyboard controller (`&mut`) and to the parser (`read`).

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotationBuffer {
    text: String,
}

impl NotationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, token: &str) {
        self.text.push_str(token);
    }

    pub fn read(&self) -> &str {
        &self.text
    }

    /// Empty the buffer (the UI's clear button).
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for NotationBuffer {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl fmt::Display for NotationBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

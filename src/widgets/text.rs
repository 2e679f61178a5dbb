use std::sync::Mutex;

use crate::{Render, lock};

/// A single line of text that can be replaced while it is displayed.
#[derive(Debug, Default)]
pub struct Text {
    line: Mutex<String>,
}

impl Text {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: Mutex::new(line.into()),
        }
    }

    /// Replaces the displayed line; shows up on the next repaint.
    pub fn set(&self, line: impl Into<String>) {
        *lock(&self.line) = line.into();
    }

    pub fn get(&self) -> String {
        lock(&self.line).clone()
    }
}

impl Render for Text {
    fn render(&self) -> String {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_line() {
        let text = Text::new("waiting");
        assert_eq!(text.render(), "waiting");
        text.set("connected");
        assert_eq!(text.render(), "connected");
        assert_eq!(text.render(), "connected");
    }
}

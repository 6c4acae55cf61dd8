// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::DocumentBuffer;

/// A single line of text. Remembers whether the current command changed it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DemoDocument {
    text: String,
    changed: bool,
    /// Whether the command being interpreted is replayed input.
    replaying: bool,
}

impl DemoDocument {
    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    #[must_use]
    pub fn is_replaying(&self) -> bool { self.replaying }

    pub fn insert(&mut self, ch: char) {
        self.text.push(ch);
        self.changed = true;
    }

    /// Remove up to `count` characters from the end. Returns how many were removed.
    pub fn delete_from_end(&mut self, count: usize) -> usize {
        let mut removed = 0;
        while removed < count && self.text.pop().is_some() {
            removed += 1;
        }
        if removed > 0 {
            self.changed = true;
        }
        removed
    }
}

impl DocumentBuffer for DemoDocument {
    fn changed_by_last_command(&self) -> bool { self.changed }

    fn notify_new_command(&mut self, from_keyboard: bool) {
        self.changed = false;
        self.replaying = !from_keyboard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_change_tracking_resets_per_command() {
        let mut document = DemoDocument::default();
        assert!(!document.changed_by_last_command());

        document.insert('a');
        document.insert('b');
        assert!(document.changed_by_last_command());

        document.notify_new_command(false);
        assert!(!document.changed_by_last_command());
        assert!(document.is_replaying());

        assert_eq!(document.delete_from_end(5), 2);
        assert_eq!(document.text(), "");
        assert!(document.changed_by_last_command());
    }

    #[test]
    fn test_deleting_nothing_is_not_a_change() {
        let mut document = DemoDocument::default();
        assert_eq!(document.delete_from_end(3), 0);
        assert!(!document.changed_by_last_command());
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DocumentBuffer, ScreenNotifier};

/// Records every notification. Whether the last command changed the document is set
/// by the test through [`Self::changed`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentMock {
    pub changed: bool,
    /// The `from_keyboard` argument of each `notify_new_command` call.
    pub notifications: Vec<bool>,
}

impl DocumentMock {
    #[must_use]
    pub fn with_changed(changed: bool) -> Self {
        Self {
            changed,
            ..Default::default()
        }
    }
}

impl DocumentBuffer for DocumentMock {
    fn changed_by_last_command(&self) -> bool { self.changed }

    fn notify_new_command(&mut self, from_keyboard: bool) {
        self.notifications.push(from_keyboard);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScreenMock {
    /// The `from_keyboard` argument of each `notify_next_input_source` call.
    pub sources: Vec<bool>,
    pub messages: Vec<String>,
}

impl ScreenNotifier for ScreenMock {
    fn notify_next_input_source(&mut self, from_keyboard: bool) {
        self.sources.push(from_keyboard);
    }

    fn show_status_message(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }
}

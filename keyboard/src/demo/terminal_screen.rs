// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ScreenNotifier;
use std::io::Write;
use tracing::{error, trace};

/// Writes status messages as lines to `writer`. Lines end with `\r\n` since raw mode
/// turns off output post processing.
#[derive(Debug)]
pub struct TerminalScreen<W: Write> {
    writer: W,
    next_from_keyboard: bool,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            next_from_keyboard: true,
        }
    }

    /// Whether the next input byte is expected from the physical keyboard.
    #[must_use]
    pub fn next_from_keyboard(&self) -> bool { self.next_from_keyboard }

    pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write> ScreenNotifier for TerminalScreen<W> {
    fn notify_next_input_source(&mut self, from_keyboard: bool) {
        trace!(from_keyboard, "next input source");
        self.next_from_keyboard = from_keyboard;
    }

    fn show_status_message(&mut self, message: &str) {
        let result = write!(self.writer, "{message}\r\n").and_then(|()| self.writer.flush());
        if let Err(error) = result {
            error!(?error, "failed to write status message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_lines_end_with_crlf() {
        let mut screen = TerminalScreen::new(Vec::new());
        screen.show_status_message("Pushed commands are too long.");
        screen.show_status_message("> abc");

        let output = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(output, "Pushed commands are too long.\r\n> abc\r\n");
    }

    #[test]
    fn test_tracks_input_source() {
        let mut screen = TerminalScreen::new(Vec::new());
        assert!(screen.next_from_keyboard());
        screen.notify_next_input_source(false);
        assert!(!screen.next_from_keyboard());
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{CommandRecorder, DocumentBuffer, PushbackQueue, QueueOutcome, RedoOutcome,
            ScreenNotifier};
use crate::{KeyInput, PARITY_MASK, PlatformRawMode, RawModeController, TerminalKeyInput};
use tracing::{debug, error, trace};

/// The keyboard input manager. The interpreter loop owns exactly one, and calls it once
/// per character.
///
/// It owns the two platform seams (where keystrokes come from, and the terminal mode
/// switch). The document and screen collaborators stay with the interpreter and are
/// lent to each call that needs them.
///
/// Dropping the manager while raw restores cooked mode, so an early return or `?` out
/// of the interpreter loop doesn't leave the terminal broken.
#[derive(Debug)]
pub struct KeyboardManager<
    K: KeyInput = TerminalKeyInput,
    R: RawModeController = PlatformRawMode,
> {
    key_input: K,
    raw_mode: R,
    pushback: PushbackQueue,
    recorder: CommandRecorder,
}

impl KeyboardManager {
    /// Wire up the controlling terminal, for both reading and mode switching. The
    /// terminal stays cooked until [`Self::initialize`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyboardError::TerminalUnavailable`] if there is no controlling
    /// terminal.
    pub fn new_terminal() -> miette::Result<Self> {
        Ok(Self::new(
            TerminalKeyInput::try_new()?,
            PlatformRawMode::try_new()?,
        ))
    }
}

impl<K: KeyInput, R: RawModeController> KeyboardManager<K, R> {
    #[must_use]
    pub fn new(key_input: K, raw_mode: R) -> Self {
        Self {
            key_input,
            raw_mode,
            pushback: PushbackQueue::default(),
            recorder: CommandRecorder::default(),
        }
    }

    /// Switch the terminal to raw mode. Calling it again while raw does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyboardError::TerminalConfig`] if the terminal can't be
    /// switched. The session can't proceed in that case.
    pub fn initialize(&mut self) -> miette::Result<()> {
        if self.raw_mode.is_raw() {
            return Ok(());
        }
        self.raw_mode.toggle()
    }

    /// Switch the terminal back to the configuration it had before
    /// [`Self::initialize`]. Calling it again while cooked does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyboardError::TerminalConfig`] if the original configuration
    /// can't be re-applied.
    pub fn shutdown(&mut self) -> miette::Result<()> {
        if !self.raw_mode.is_raw() {
            return Ok(());
        }
        self.raw_mode.toggle()
    }

    /// Deliver the next character: pending push-back first, otherwise one keystroke
    /// with the high bit stripped. Blocks if it has to read a keystroke. The character
    /// is recorded into the current command, and `screen` learns whether the character
    /// after this one will come from the keyboard.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyboardError::ReadFailed`] or
    /// [`crate::KeyboardError::EndOfInput`] if the keystroke read fails.
    pub fn next_char(&mut self, screen: &mut impl ScreenNotifier) -> miette::Result<u8> {
        let (byte, replayed) = match self.pushback.pop() {
            Some(byte) => (byte, true),
            None => (self.key_input.read_byte()? & PARITY_MASK, false),
        };
        trace!(byte, replayed, "next char");

        self.recorder.record(byte);
        screen.notify_next_input_source(self.pushback.is_empty());
        Ok(byte)
    }

    /// Have `text` read before any further keystroke. If the push-back queue can't
    /// hold it, the status message `Pushed commands are too long.` is shown and
    /// nothing is queued.
    pub fn queue_next(
        &mut self,
        text: impl AsRef<[u8]>,
        screen: &mut impl ScreenNotifier,
    ) -> QueueOutcome {
        self.pushback.push_or_report(text.as_ref(), screen)
    }

    /// Replay the last command that changed the document.
    pub fn redo_last_change(&mut self, screen: &mut impl ScreenNotifier) -> RedoOutcome {
        let outcome = self.recorder.redo(&mut self.pushback, screen);
        debug!(?outcome, "redo last change");
        outcome
    }

    /// Mark a command boundary. See [`CommandRecorder::start_new_command`].
    pub fn start_new_command(&mut self, document: &mut impl DocumentBuffer) {
        self.recorder.start_new_command(document, &self.pushback);
    }

    /// The first ASCII letter of the last finished command, `None` if it had none.
    #[must_use]
    pub fn last_command_first_letter(&self) -> Option<char> {
        self.recorder.last_command_first_letter()
    }

    #[must_use]
    pub fn is_raw(&self) -> bool { self.raw_mode.is_raw() }

    /// Number of bytes waiting to be replayed.
    #[must_use]
    pub fn pending_pushback(&self) -> usize { self.pushback.len() }

    #[must_use]
    pub fn current_command(&self) -> &[u8] { self.recorder.current_command() }

    /// The redo target, empty until a command changed the document.
    #[must_use]
    pub fn last_change(&self) -> &[u8] { self.recorder.last_change() }

    #[must_use]
    pub fn raw_mode(&self) -> &R { &self.raw_mode }
}

impl<K: KeyInput, R: RawModeController> Drop for KeyboardManager<K, R> {
    fn drop(&mut self) {
        if self.raw_mode.is_raw()
            && let Err(report) = self.raw_mode.restore_cooked()
        {
            error!(?report, "failed to restore terminal on drop");
        }
    }
}

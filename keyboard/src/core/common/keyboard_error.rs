// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error taxonomy for the keyboard manager.
//!
//! | Variant                    | Severity    | Handled where                           |
//! | -------------------------- | ----------- | --------------------------------------- |
//! | [`PushbackOverflow`]       | Recoverable | Façade, shown as a status message       |
//! | [`ChangeBufferCorrupted`]  | Recoverable | Façade, shown as a status message       |
//! | [`TerminalConfig`]         | Fatal       | Propagated to `main()`                  |
//! | [`TerminalUnavailable`]    | Fatal       | Propagated to `main()`                  |
//! | [`ReadFailed`]             | Fatal       | Propagated to `main()`                  |
//! | [`EndOfInput`]             | Fatal       | Propagated to `main()`                  |
//!
//! "Nothing to redo" is not an error, see [`crate::RedoOutcome::NothingToRedo`].
//!
//! [`PushbackOverflow`]: KeyboardError::PushbackOverflow
//! [`ChangeBufferCorrupted`]: KeyboardError::ChangeBufferCorrupted
//! [`TerminalConfig`]: KeyboardError::TerminalConfig
//! [`TerminalUnavailable`]: KeyboardError::TerminalUnavailable
//! [`ReadFailed`]: KeyboardError::ReadFailed
//! [`EndOfInput`]: KeyboardError::EndOfInput

use std::fmt::{Display, Formatter};

/// Which step of a terminal mode switch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalOperation {
    /// Reading the current configuration (`tcgetattr`).
    Retrieve,
    /// Applying the raw configuration (`tcsetattr`).
    Apply,
    /// Re-applying the captured original configuration.
    Restore,
}

impl Display for TerminalOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalOperation::Retrieve => write!(f, "retrieve"),
            TerminalOperation::Apply => write!(f, "apply"),
            TerminalOperation::Restore => write!(f, "restore"),
        }
    }
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum KeyboardError {
    /// A push would make the push-back queue hold more than its capacity. The queue is
    /// left untouched.
    #[error("Pushed commands are too long.")]
    #[diagnostic(
        code(r3bl_keyboard::pushback::overflow),
        help("Wait for the pending commands to be consumed before queueing more")
    )]
    PushbackOverflow {
        requested: usize,
        pending: usize,
        capacity: usize,
    },

    /// The redo target is longer than [`crate::CMD_MAX`]: the command overflowed while
    /// it was recorded. The target is discarded.
    #[error("Cannot redo commands longer than {capacity} characters.")]
    #[diagnostic(code(r3bl_keyboard::redo::change_buffer_corrupted))]
    ChangeBufferCorrupted { length: usize, capacity: usize },

    /// The terminal could not be switched between cooked and raw mode.
    #[error("Failed to {operation} terminal attributes")]
    #[diagnostic(
        code(r3bl_keyboard::raw_mode::terminal_config),
        help("Run `stty sane` (or `reset`) if your terminal is left in a broken state")
    )]
    TerminalConfig {
        operation: TerminalOperation,
        #[source]
        source: std::io::Error,
    },

    /// Neither stdin nor `/dev/tty` is a terminal.
    #[error("No controlling terminal is available")]
    #[diagnostic(
        code(r3bl_keyboard::terminal::unavailable),
        help("This program must be run from an interactive terminal")
    )]
    TerminalUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read a keystroke from the terminal")]
    #[diagnostic(code(r3bl_keyboard::terminal::read_failed))]
    ReadFailed {
        #[source]
        source: std::io::Error,
    },

    #[error("The terminal reached end of input")]
    #[diagnostic(code(r3bl_keyboard::terminal::end_of_input))]
    EndOfInput,
}

impl KeyboardError {
    /// Errors that are fully handled at the detection site by showing a status
    /// message. Everything else ends the interactive session.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            KeyboardError::PushbackOverflow { .. }
                | KeyboardError::ChangeBufferCorrupted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CMD_MAX;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_messages() {
        let overflow = KeyboardError::PushbackOverflow {
            requested: 10,
            pending: 495,
            capacity: CMD_MAX,
        };
        assert_eq!(overflow.to_string(), "Pushed commands are too long.");

        let corrupted = KeyboardError::ChangeBufferCorrupted {
            length: CMD_MAX + 1,
            capacity: CMD_MAX,
        };
        assert_eq!(
            corrupted.to_string(),
            "Cannot redo commands longer than 500 characters."
        );
    }

    #[test]
    fn test_terminal_config_message_names_operation() {
        let error = KeyboardError::TerminalConfig {
            operation: TerminalOperation::Restore,
            source: std::io::Error::other("boom"),
        };
        assert_eq!(error.to_string(), "Failed to restore terminal attributes");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(
            KeyboardError::PushbackOverflow {
                requested: 1,
                pending: CMD_MAX,
                capacity: CMD_MAX,
            }
            .is_recoverable()
        );
        assert!(!KeyboardError::EndOfInput.is_recoverable());
        assert!(
            !KeyboardError::ReadFailed {
                source: std::io::Error::other("boom"),
            }
            .is_recoverable()
        );
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::TerminalFd;
use crate::KeyboardError;
use std::io::{ErrorKind, Read};

/// A source of raw keystroke bytes. The [`crate::KeyboardManager`] calls this only when
/// its push-back queue is empty.
///
/// See [`crate::KeyInputMock`] for the in-memory implementation used in tests.
pub trait KeyInput {
    /// Block until one byte is available and return it, unmasked.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::EndOfInput`] if the device is closed, and
    /// [`KeyboardError::ReadFailed`] for any other I/O failure.
    fn read_byte(&mut self) -> miette::Result<u8>;
}

/// Reads single bytes from the controlling terminal. There is no timeout and no
/// cancellation, a read completes when the user types.
#[derive(Debug)]
pub struct TerminalKeyInput {
    fd: TerminalFd,
}

impl TerminalKeyInput {
    /// # Errors
    ///
    /// Returns [`KeyboardError::TerminalUnavailable`] if there is no controlling
    /// terminal.
    pub fn try_new() -> miette::Result<Self> {
        Ok(Self {
            fd: TerminalFd::open()?,
        })
    }
}

impl KeyInput for TerminalKeyInput {
    fn read_byte(&mut self) -> miette::Result<u8> {
        let mut buf = [0_u8; 1];
        loop {
            match self.fd.read(&mut buf) {
                Ok(0) => return Err(KeyboardError::EndOfInput.into()),
                Ok(_) => return Ok(buf[0]),
                Err(error) if error.kind() == ErrorKind::Interrupted => {}
                Err(source) => {
                    tracing::error!(?source, "keystroke read failed");
                    return Err(KeyboardError::ReadFailed { source }.into());
                }
            }
        }
    }
}

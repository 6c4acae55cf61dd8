// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::KeyboardError;
use std::io::{self, Read};
#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use rustix::{fd::{AsFd, BorrowedFd},
             termios};

/// Represents either stdin or `/dev/tty` for terminal operations.
///
/// This enum allows us to handle both cases where stdin is a tty (normal terminal usage)
/// and where stdin is redirected (e.g., piped input), requiring us to use `/dev/tty`.
#[derive(Debug)]
pub enum TerminalFd {
    /// Using standard input (when it's a terminal)
    Stdin(io::Stdin),
    /// Using `/dev/tty` (when stdin is redirected)
    #[cfg(unix)]
    DevTty(File),
}

impl TerminalFd {
    /// Gets a handle to the controlling terminal.
    ///
    /// Follows crossterm's approach: checks if stdin is a tty and uses it if so;
    /// otherwise opens `/dev/tty`. On Windows this is always the console's stdin.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::TerminalUnavailable`] if stdin is not a tty and
    /// `/dev/tty` cannot be opened.
    #[cfg(unix)]
    pub fn open() -> Result<Self, KeyboardError> {
        let stdin = io::stdin();
        if termios::isatty(&stdin) {
            return Ok(TerminalFd::Stdin(stdin));
        }
        File::options()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .map(TerminalFd::DevTty)
            .map_err(|source| KeyboardError::TerminalUnavailable { source })
    }

    /// Gets a handle to the console's stdin.
    ///
    /// # Errors
    ///
    /// Never fails on this platform, the signature matches the Unix version.
    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    pub fn open() -> Result<Self, KeyboardError> { Ok(TerminalFd::Stdin(io::stdin())) }
}

#[cfg(unix)]
impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
        }
    }
}

impl Read for TerminalFd {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.lock().read(buf),
            #[cfg(unix)]
            TerminalFd::DevTty(file) => file.read(buf),
        }
    }
}

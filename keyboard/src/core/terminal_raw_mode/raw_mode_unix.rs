// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix/Linux/macOS implementation of raw mode using rustix's safe termios API.

use super::{RawModeController, TerminalSnapshot};
use crate::{KeyboardError, TerminalFd, TerminalOperation};
use rustix::termios::{self, InputModes, LocalModes, OptionalActions, OutputModes,
                      SpecialCodeIndex, Termios};
use tracing::debug;

/// [`RawModeController`] backed by the termios settings of the controlling terminal
/// (stdin if it's a tty, otherwise `/dev/tty`).
pub struct TermiosRawMode {
    fd: TerminalFd,
    /// Captured by [`RawModeController::enter_raw`], re-applied by
    /// [`RawModeController::restore_cooked`].
    original: Option<Termios>,
    is_raw: bool,
}

impl std::fmt::Debug for TermiosRawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermiosRawMode")
            .field("fd", &self.fd)
            .field("has_original", &self.original.is_some())
            .field("is_raw", &self.is_raw)
            .finish()
    }
}

impl TermiosRawMode {
    /// Open the controlling terminal. The terminal configuration is not touched until
    /// [`RawModeController::enter_raw`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::TerminalUnavailable`] if there is no controlling
    /// terminal.
    pub fn try_new() -> miette::Result<Self> {
        Ok(Self {
            fd: TerminalFd::open()?,
            original: None,
            is_raw: false,
        })
    }

    /// A copy of the configuration captured when raw mode was entered, for the exit
    /// path helpers. [`None`] until raw mode has been entered once.
    #[must_use]
    pub fn snapshot(&self) -> Option<TerminalSnapshot> {
        self.original.clone().map(TerminalSnapshot::new)
    }
}

/// Derive the raw configuration from `termios`:
/// - local modes: no signal generation, no canonical (line) mode, no echo
/// - input modes: no NL/CR translation, no case mapping, no XON/XOFF flow control
/// - output modes: no post processing
/// - `VMIN=1`, `VTIME=0`: a read returns as soon as 1 byte is available, no inter-byte
///   timeout
pub fn make_raw(termios: &mut Termios) {
    termios.local_modes &= !(LocalModes::ISIG | LocalModes::ICANON | LocalModes::ECHO);

    termios.input_modes &= !(InputModes::INLCR
        | InputModes::IGNCR
        | InputModes::ICRNL
        | InputModes::IXON
        | InputModes::IXOFF);
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        termios.input_modes &= !InputModes::IUCLC;
    }

    termios.output_modes &= !OutputModes::OPOST;

    termios.special_codes[SpecialCodeIndex::VMIN] = 1;
    termios.special_codes[SpecialCodeIndex::VTIME] = 0;
}

fn terminal_config_error(
    operation: TerminalOperation,
) -> impl FnOnce(rustix::io::Errno) -> KeyboardError {
    move |errno| {
        tracing::error!(%operation, %errno, "terminal configuration failed");
        KeyboardError::TerminalConfig {
            operation,
            source: errno.into(),
        }
    }
}

impl RawModeController for TermiosRawMode {
    fn is_raw(&self) -> bool { self.is_raw }

    fn enter_raw(&mut self) -> miette::Result<()> {
        if self.is_raw {
            return Ok(());
        }

        let original = termios::tcgetattr(&self.fd)
            .map_err(terminal_config_error(TerminalOperation::Retrieve))?;

        let mut raw = original.clone();
        make_raw(&mut raw);

        // Drain: pending output is written before the switch, like `TCSETSW`.
        termios::tcsetattr(&self.fd, OptionalActions::Drain, &raw)
            .map_err(terminal_config_error(TerminalOperation::Apply))?;

        self.original = Some(original);
        self.is_raw = true;
        debug!("termios: entered raw mode");
        Ok(())
    }

    fn restore_cooked(&mut self) -> miette::Result<()> {
        if !self.is_raw {
            return Ok(());
        }

        if let Some(original) = &self.original {
            termios::tcsetattr(&self.fd, OptionalActions::Drain, original)
                .map_err(terminal_config_error(TerminalOperation::Restore))?;
        }

        self.is_raw = false;
        debug!("termios: restored cooked mode");
        Ok(())
    }
}

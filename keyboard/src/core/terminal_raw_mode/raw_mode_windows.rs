// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Windows implementation of raw mode using Crossterm.

use super::{RawModeController, TerminalSnapshot};
use crate::{KeyboardError, TerminalOperation};
use tracing::debug;

/// [`RawModeController`] for the Windows console.
///
/// Delegates to [`crossterm::terminal::enable_raw_mode()`] which handles the Windows
/// Console API (`SetConsoleMode()`) to disable:
/// - `ENABLE_LINE_INPUT` - line buffering
/// - `ENABLE_ECHO_INPUT` - character echo
/// - `ENABLE_PROCESSED_INPUT` - Ctrl+C handling
///
/// Crossterm captures the original console mode itself and re-applies it in
/// [`crossterm::terminal::disable_raw_mode()`].
#[derive(Debug, Default)]
pub struct ConsoleRawMode {
    is_raw: bool,
}

impl ConsoleRawMode {
    /// # Errors
    ///
    /// Never fails on this platform, the signature matches the Unix version.
    #[allow(clippy::unnecessary_wraps)]
    pub fn try_new() -> miette::Result<Self> { Ok(Self::default()) }

    /// See [`TerminalSnapshot`].
    #[must_use]
    pub fn snapshot(&self) -> Option<TerminalSnapshot> {
        self.is_raw.then(TerminalSnapshot::new)
    }
}

impl RawModeController for ConsoleRawMode {
    fn is_raw(&self) -> bool { self.is_raw }

    fn enter_raw(&mut self) -> miette::Result<()> {
        if self.is_raw {
            return Ok(());
        }
        crossterm::terminal::enable_raw_mode().map_err(|source| {
            KeyboardError::TerminalConfig {
                operation: TerminalOperation::Apply,
                source,
            }
        })?;
        self.is_raw = true;
        debug!("console: entered raw mode");
        Ok(())
    }

    fn restore_cooked(&mut self) -> miette::Result<()> {
        if !self.is_raw {
            return Ok(());
        }
        crossterm::terminal::disable_raw_mode().map_err(|source| {
            KeyboardError::TerminalConfig {
                operation: TerminalOperation::Restore,
                source,
            }
        })?;
        self.is_raw = false;
        debug!("console: restored cooked mode");
        Ok(())
    }
}

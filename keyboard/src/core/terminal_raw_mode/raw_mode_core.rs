// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Core raw mode functionality and RAII guard.
//!
//! This module provides:
//! - The [`RawModeController`] capability trait, one implementation per platform
//! - The [`PlatformRawMode`] alias that picks the implementation for the target
//! - The [`RawModeGuard`] RAII wrapper for automatic resource cleanup

use tracing::debug;

/// Makes the terminal behave either like a normal line editor terminal, or like a raw
/// character source.
///
/// The controller tracks the mode it put the terminal in. The mode is toggled by
/// explicit calls only, it is never inferred from the device.
pub trait RawModeController {
    /// `false` (cooked) until [`Self::enter_raw`] succeeds.
    fn is_raw(&self) -> bool;

    /// Capture the current configuration, then apply a derived one with echo, line
    /// buffering and signal generation disabled, and 1 byte minimal reads. No-op if
    /// already raw.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyboardError::TerminalConfig`] if the configuration can't be
    /// retrieved or applied. The session can't proceed in that case.
    fn enter_raw(&mut self) -> miette::Result<()>;

    /// Re-apply the configuration captured by [`Self::enter_raw`]. No-op if already
    /// cooked.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KeyboardError::TerminalConfig`] if the configuration can't be
    /// applied.
    fn restore_cooked(&mut self) -> miette::Result<()>;

    /// Flip between the two modes based on the current state.
    ///
    /// # Errors
    ///
    /// See [`Self::enter_raw`] and [`Self::restore_cooked`].
    fn toggle(&mut self) -> miette::Result<()> {
        if self.is_raw() {
            debug!("raw mode toggle: raw -> cooked");
            self.restore_cooked()
        } else {
            debug!("raw mode toggle: cooked -> raw");
            self.enter_raw()
        }
    }
}

/// The [`RawModeController`] for the target platform.
#[cfg(unix)]
pub type PlatformRawMode = super::TermiosRawMode;

/// The [`RawModeController`] for the target platform.
#[cfg(windows)]
pub type PlatformRawMode = super::ConsoleRawMode;

/// RAII guard that enters raw mode on creation and restores cooked mode when dropped.
///
/// Recommended when raw mode is needed for a lexical scope, since it ensures the
/// terminal is restored on early return and on panic (unwinding).
#[derive(Debug)]
pub struct RawModeGuard<R: RawModeController> {
    controller: R,
}

impl<R: RawModeController> RawModeGuard<R> {
    /// Enter raw mode using `controller`.
    ///
    /// # Errors
    ///
    /// See [`RawModeController::enter_raw`].
    pub fn new(mut controller: R) -> miette::Result<Self> {
        controller.enter_raw()?;
        Ok(Self { controller })
    }

    #[must_use]
    pub fn controller(&self) -> &R { &self.controller }
}

impl<R: RawModeController> Drop for RawModeGuard<R> {
    fn drop(&mut self) {
        if let Err(report) = self.controller.restore_cooked() {
            tracing::error!(?report, "failed to restore cooked mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawModeMock;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toggle_flips_state() {
        let mut mock = RawModeMock::default();
        assert!(!mock.is_raw());

        mock.toggle().unwrap();
        assert!(mock.is_raw());

        mock.toggle().unwrap();
        assert!(!mock.is_raw());
        assert_eq!(mock.switch_count(), 2);
    }

    #[test]
    fn test_enter_and_restore_are_noops_when_already_in_mode() {
        let mut mock = RawModeMock::default();

        mock.restore_cooked().unwrap();
        assert_eq!(mock.switch_count(), 0);

        mock.enter_raw().unwrap();
        mock.enter_raw().unwrap();
        assert_eq!(mock.switch_count(), 1);

        mock.restore_cooked().unwrap();
        mock.restore_cooked().unwrap();
        assert_eq!(mock.switch_count(), 2);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mock = RawModeMock::default();
        let before = mock.device_config();
        {
            let guard = RawModeGuard::new(mock.clone()).unwrap();
            assert!(guard.controller().is_raw());
            assert_ne!(mock.device_config(), before);
        }
        assert_eq!(mock.device_config(), before);
        assert_eq!(mock.switch_count(), 2);
    }

    #[test]
    fn test_guard_creation_fails_when_device_rejects_config() {
        let mock = RawModeMock::default();
        mock.fail_next_switch();
        assert!(RawModeGuard::new(mock.clone()).is_err());
        assert_eq!(mock.switch_count(), 0);
    }
}

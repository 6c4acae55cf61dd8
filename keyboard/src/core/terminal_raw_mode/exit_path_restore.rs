// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Restoring the terminal from outside of the [`super::RawModeController`] owner: from
//! a panic hook, and from a thread that watches for termination signals.

use tracing::{debug, error};

/// The original (cooked) terminal configuration, captured when raw mode was entered.
/// Cloned into the panic hook and the signal watcher thread.
#[derive(Clone)]
#[cfg_attr(not(unix), derive(Default))]
pub struct TerminalSnapshot {
    #[cfg(unix)]
    original: rustix::termios::Termios,
}

impl std::fmt::Debug for TerminalSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSnapshot").finish_non_exhaustive()
    }
}

impl TerminalSnapshot {
    #[cfg(unix)]
    #[must_use]
    pub fn new(original: rustix::termios::Termios) -> Self { Self { original } }

    #[cfg(not(unix))]
    #[must_use]
    pub fn new() -> Self { Self {} }

    /// Re-apply the captured configuration immediately (no drain, the process is about
    /// to go away).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be opened or configured.
    #[cfg(unix)]
    pub fn restore(&self) -> miette::Result<()> {
        use crate::{KeyboardError, TerminalFd, TerminalOperation};
        let fd = TerminalFd::open()?;
        rustix::termios::tcsetattr(
            &fd,
            rustix::termios::OptionalActions::Now,
            &self.original,
        )
        .map_err(|errno| KeyboardError::TerminalConfig {
            operation: TerminalOperation::Restore,
            source: errno.into(),
        })?;
        Ok(())
    }

    /// Re-apply the console mode crossterm captured.
    ///
    /// # Errors
    ///
    /// Returns an error if the console mode can't be restored.
    #[cfg(not(unix))]
    pub fn restore(&self) -> miette::Result<()> {
        crossterm::terminal::disable_raw_mode().map_err(|source| {
            crate::KeyboardError::TerminalConfig {
                operation: crate::TerminalOperation::Restore,
                source,
            }
        })?;
        Ok(())
    }
}

/// Chain a panic hook that restores the terminal before the previously installed hook
/// prints the panic message. Otherwise the message is printed with echo off and no
/// output post processing, and the shell is left in raw mode if the process aborts.
pub fn install_panic_hook_restoring_terminal(snapshot: TerminalSnapshot) {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(report) = snapshot.restore() {
            error!(?report, "panic hook: failed to restore terminal");
        }
        previous_hook(panic_info);
    }));
}

/// Signals that terminate the process while the terminal is raw. `SIGINT` is not in
/// the list because raw mode turns off signal generation from the keyboard.
#[cfg(unix)]
pub const TERMINATION_SIGNALS: [i32; 3] = [
    signal_hook::consts::SIGTERM,
    signal_hook::consts::SIGHUP,
    signal_hook::consts::SIGQUIT,
];

/// Spawn a thread that waits for one of [`TERMINATION_SIGNALS`], restores the terminal
/// from `snapshot`, and exits the process with status `128 + signal`.
///
/// This is the only thread in the process besides the interpreter loop. It touches
/// nothing but the terminal device.
///
/// # Errors
///
/// Returns an error if the signal handlers can't be registered, or the thread can't
/// be spawned.
#[cfg(unix)]
pub fn spawn_signal_restorer(
    snapshot: TerminalSnapshot,
) -> miette::Result<std::thread::JoinHandle<()>> {
    use miette::IntoDiagnostic;
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new(TERMINATION_SIGNALS).into_diagnostic()?;

    std::thread::Builder::new()
        .name("terminal-restore-on-signal".into())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                debug!(signal, "termination signal, restoring terminal");
                if let Err(report) = snapshot.restore() {
                    error!(?report, "signal watcher: failed to restore terminal");
                }
                std::process::exit(128 + signal);
            }
        })
        .into_diagnostic()
}

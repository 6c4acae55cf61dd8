// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Switching the terminal between cooked mode and raw mode.
//!
//! ## Raw Mode vs Cooked Mode
//!
//! **Cooked Mode** (default):
//! - Input is line-buffered (waits for Enter key)
//! - Special characters are interpreted (Ctrl+C, Ctrl+D, etc.)
//! - Echoing is enabled (typed characters appear on screen)
//!
//! **Raw Mode**, as the keyboard manager needs it:
//! - No line buffering, a read returns after 1 byte with no inter-byte timeout
//!   (`VMIN=1`, `VTIME=0`)
//! - No echo
//! - No signal generation from interrupt keys (`ISIG` off), Ctrl+C arrives as `0x03`
//! - No CR/NL translation and no XON/XOFF flow control on input
//! - No output post processing (`OPOST` off), so writers must emit `\r\n`
//!
//! ## Platform Support
//!
//! - **Unix/Linux/macOS**: [`TermiosRawMode`] uses rustix's safe termios API
//! - **Windows**: [`ConsoleRawMode`] delegates to crossterm's console mode switching
//!
//! [`PlatformRawMode`] names the right one for the target, callers never branch on
//! platform.
//!
//! ## Exit paths
//!
//! The original terminal configuration must be restored on every exit path:
//! - Normal shutdown: [`crate::KeyboardManager::shutdown`]
//! - Early return / `?` / fatal error: `Drop` for [`crate::KeyboardManager`] and
//!   [`RawModeGuard`]
//! - Panic: [`install_panic_hook_restoring_terminal`]
//! - Termination signals (Unix): [`spawn_signal_restorer`]
//!
//! The last two work from a [`TerminalSnapshot`], since they run outside of the owner
//! of the controller.

// Private modules (hide internal structure).
mod exit_path_restore;
mod raw_mode_core;

#[cfg(unix)]
mod raw_mode_unix;

#[cfg(windows)]
mod raw_mode_windows;

// Re-export the public API (flat, ergonomic surface).
pub use exit_path_restore::*;
pub use raw_mode_core::*;

#[cfg(unix)]
pub use raw_mode_unix::*;

#[cfg(windows)]
pub use raw_mode_windows::*;

// Conditional re-export for automated integration tests (Unix only).
#[cfg(all(unix, test))]
pub mod integration_tests;

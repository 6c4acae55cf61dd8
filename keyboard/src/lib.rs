// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_keyboard
//!
//! The keystroke acquisition layer of an interactive line editing terminal app. It
//! does three things:
//!
//! 1. Reads raw keystrokes from the terminal device, one byte at a time, with the
//!    parity (high) bit stripped.
//! 2. Assembles the bytes the interpreter consumes into "commands", remembers the last
//!    command that changed the document, and can replay it (redo) by pushing it back
//!    onto the input stream ahead of live keystrokes.
//! 3. Switches the terminal between cooked mode (echo, line buffering) and raw mode
//!    (no echo, no line buffering, no signal generation, 1 byte reads) while commands
//!    are being interpreted.
//!
//! ```text
//! ┌────────────────────────── KeyboardManager ──────────────────────────┐
//! │                                                                     │
//! │  next_char() ─▶ PushbackQueue (pending?) ─▶ pop                     │
//! │                        │ empty                                      │
//! │                        ▼                                            │
//! │                 KeyInput::read_byte() & 0x7F                        │
//! │                        │                                            │
//! │                        ▼                                            │
//! │                 CommandRecorder::record() ─▶ ScreenNotifier         │
//! │                                                                     │
//! │  start_new_command() ─▶ DocumentBuffer::changed_by_last_command()   │
//! │  redo_last_change()  ─▶ PushbackQueue::push(last change)            │
//! │  initialize() / shutdown() ─▶ RawModeController::toggle()           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document model and the screen renderer are collaborators that are passed into
//! the operations that need them. See [`DocumentBuffer`] and [`ScreenNotifier`].
//!
//! # Example
//!
//! ```no_run
//! use r3bl_keyboard::{DocumentBuffer, KeyboardManager, ScreenNotifier};
//!
//! # fn run(
//! #     document: &mut impl DocumentBuffer,
//! #     screen: &mut impl ScreenNotifier,
//! # ) -> miette::Result<()> {
//! let mut keyboard = KeyboardManager::new_terminal()?;
//! keyboard.initialize()?;
//! loop {
//!     keyboard.start_new_command(document);
//!     let ch = keyboard.next_char(screen)?;
//!     if ch == b'q' {
//!         break;
//!     }
//! }
//! keyboard.shutdown()?;
//! # Ok(())
//! # }
//! ```

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod demo;
pub mod keyboard;
pub mod test_fixtures;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use crate::core::*;
pub use keyboard::*;
pub use test_fixtures::*;

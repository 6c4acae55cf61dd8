// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A tiny line editor driving the [`crate::KeyboardManager`], used by the `kbd`
//! binary. Commands are an optional count followed by a letter:
//!
//! | Command     | Effect                                                   |
//! | ----------- | -------------------------------------------------------- |
//! | `i` … `ESC` | Insert the typed text at the end of the line             |
//! | `[n]x`      | Delete `n` (default 1) characters from the end           |
//! | `D`         | Delete the whole line, by queueing `<len>x` for replay   |
//! | `.`         | Redo the last command that changed the line              |
//! | `q`         | Quit                                                     |

// Attach sources.
pub mod clap_config;
pub mod demo_document;
pub mod interpreter;
pub mod terminal_screen;

// Re-export.
pub use clap_config::*;
pub use demo_document::*;
pub use interpreter::*;
pub use terminal_screen::*;

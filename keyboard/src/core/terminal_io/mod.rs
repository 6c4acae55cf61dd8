// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod key_input;
mod terminal_fd;

// Re-exports for flat public API.
pub use key_input::*;
pub use terminal_fd::*;

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod common;
pub mod log;
pub mod terminal_io;
pub mod terminal_raw_mode;

// Re-export.
pub use common::*;
pub use log::*;
pub use terminal_io::*;
pub use terminal_raw_mode::*;

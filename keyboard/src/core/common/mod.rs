// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod constants;
pub mod keyboard_error;
pub mod miette_setup_global_report_handler;

// Re-export.
pub use constants::*;
pub use keyboard_error::*;
pub use miette_setup_global_report_handler::*;

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod bounded_buffer;
pub mod collaborators;
pub mod command_recorder;
pub mod keyboard_manager;
pub mod pushback_queue;

// Re-export.
pub use bounded_buffer::*;
pub use collaborators::*;
pub use command_recorder::*;
pub use keyboard_manager::*;
pub use pushback_queue::*;

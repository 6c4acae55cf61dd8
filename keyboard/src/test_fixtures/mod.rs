// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-memory stand-ins for every seam of the keyboard manager, plus the PTY test
//! harness for the real terminal.

// Attach sources.
pub mod collaborator_mocks;
pub mod key_input_mock;
pub mod pty_test_fixtures;
pub mod raw_mode_mock;

// Re-export.
pub use collaborator_mocks::*;
pub use key_input_mock::*;
pub use pty_test_fixtures::*;
pub use raw_mode_mock::*;

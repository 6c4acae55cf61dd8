// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tests against a real terminal, each running in a child process attached to a PTY.
//! Skipped in CI.

mod test_initialize_shutdown_restores;
mod test_snapshot_restore;

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

mod slave_report;

// Re-export.
pub use slave_report::*;

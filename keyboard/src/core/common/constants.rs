// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Longest command that can be redone. This is also the capacity of the push-back
/// queue.
pub const CMD_MAX: usize = 500;

/// How many bytes of a command are recorded. The byte past [`CMD_MAX`] is kept so an
/// overlong command is recognized at redo time instead of replaying a truncated copy.
pub const CMD_RECORD_CAPACITY: usize = CMD_MAX + 1;

/// Only the low 7 bits of a byte read from the terminal are meaningful command input.
/// The device may deliver 8 bit frames with a parity bit in the high position.
pub const PARITY_MASK: u8 = 0x7F;

/// Escape key, ends text insertion in the demo interpreter.
pub const ESC: u8 = 0x1B;

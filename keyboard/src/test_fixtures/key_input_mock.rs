// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyInput, KeyboardError};
use std::collections::VecDeque;

/// Plays back a fixed sequence of raw bytes, as if typed. Once they are used up every
/// read fails with [`KeyboardError::EndOfInput`], like a closed terminal.
#[derive(Debug, Default, Clone)]
pub struct KeyInputMock {
    bytes: VecDeque<u8>,
}

impl KeyInputMock {
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize { self.bytes.len() }
}

impl KeyInput for KeyInputMock {
    fn read_byte(&mut self) -> miette::Result<u8> {
        self.bytes
            .pop_front()
            .ok_or_else(|| KeyboardError::EndOfInput.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plays_back_then_ends() {
        let mut input = KeyInputMock::new([0x8A, b'q']);
        assert_eq!(input.read_byte().unwrap(), 0x8A);
        assert_eq!(input.read_byte().unwrap(), b'q');
        assert_eq!(input.remaining(), 0);

        let report = input.read_byte().unwrap_err();
        assert!(matches!(
            report.downcast_ref::<KeyboardError>(),
            Some(KeyboardError::EndOfInput)
        ));
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyboardError, RawModeController, TerminalOperation};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Device configuration bits a cooked terminal starts with. Only their equality
/// matters to tests.
pub const MOCK_COOKED_CONFIG: u32 = 0b1111_0101;

/// The bits [`RawModeMock::enter_raw`] clears (think echo, line buffering, signals).
pub const MOCK_RAW_CLEARED_BITS: u32 = 0b0000_0111;

#[derive(Debug)]
struct MockDevice {
    is_raw: bool,
    config: u32,
    saved: Option<u32>,
    switch_count: usize,
    fail_next_switch: bool,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self {
            is_raw: false,
            config: MOCK_COOKED_CONFIG,
            saved: None,
            switch_count: 0,
            fail_next_switch: false,
        }
    }
}

/// A [`RawModeController`] over a pretend terminal device.
///
/// Clones share the device, so a test can hand one clone to the code under test and
/// keep another to inspect the device afterwards (even after the first was dropped).
#[derive(Debug, Default, Clone)]
pub struct RawModeMock {
    device: Arc<Mutex<MockDevice>>,
}

impl RawModeMock {
    fn lock(&self) -> MutexGuard<'_, MockDevice> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The configuration currently applied to the pretend device.
    #[must_use]
    pub fn device_config(&self) -> u32 { self.lock().config }

    /// Number of actual mode switches (no-ops are not counted).
    #[must_use]
    pub fn switch_count(&self) -> usize { self.lock().switch_count }

    /// Make the next mode switch fail as if the device rejected it.
    pub fn fail_next_switch(&self) { self.lock().fail_next_switch = true; }
}

fn take_failure(
    device: &mut MockDevice,
    operation: TerminalOperation,
) -> miette::Result<()> {
    if std::mem::take(&mut device.fail_next_switch) {
        return Err(KeyboardError::TerminalConfig {
            operation,
            source: std::io::Error::other("mock device rejected the configuration"),
        }
        .into());
    }
    Ok(())
}

impl RawModeController for RawModeMock {
    fn is_raw(&self) -> bool { self.lock().is_raw }

    fn enter_raw(&mut self) -> miette::Result<()> {
        let mut device = self.lock();
        if device.is_raw {
            return Ok(());
        }
        take_failure(&mut device, TerminalOperation::Apply)?;
        device.saved = Some(device.config);
        device.config &= !MOCK_RAW_CLEARED_BITS;
        device.is_raw = true;
        device.switch_count += 1;
        Ok(())
    }

    fn restore_cooked(&mut self) -> miette::Result<()> {
        let mut device = self.lock();
        if !device.is_raw {
            return Ok(());
        }
        take_failure(&mut device, TerminalOperation::Restore)?;
        if let Some(saved) = device.saved.take() {
            device.config = saved;
        }
        device.is_raw = false;
        device.switch_count += 1;
        Ok(())
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A matched `initialize()` + `shutdown()` leaves the terminal configuration exactly as
//! it was, across several cycles, and the raw configuration has the expected flags.

use crate::{KeyboardManager, TermiosRawMode, TerminalKeyInput, generate_pty_test,
            pty_slave_fail, pty_slave_succeed, read_pty_slave_outcome};
use rustix::termios::{self, InputModes, LocalModes, OutputModes, SpecialCodeIndex,
                      Termios};

const CYCLES: usize = 3;

generate_pty_test! {
    #[serial_test::serial]
    /// Run with: `cargo test -p r3bl_keyboard --lib test_initialize_shutdown_restores -- --nocapture`
    test_fn: test_initialize_shutdown_restores,
    master: pty_master_entry_point,
    slave: pty_slave_entry_point
}

fn pty_master_entry_point(
    pty_pair: portable_pty::PtyPair,
    mut child: Box<dyn portable_pty::Child + Send + Sync>,
) {
    let reader = pty_pair
        .master
        .try_clone_reader()
        .expect("Failed to get reader");
    // Only the child holds the slave side now, so the reader sees EOF if it dies.
    drop(pty_pair.slave);

    let outcome = read_pty_slave_outcome(reader);
    eprintln!("✅ PTY Master: {outcome}");

    let status = child.wait().expect("Failed to wait for slave");
    assert!(status.success(), "Slave exited with {status:?}");
}

fn read_termios() -> Termios {
    termios::tcgetattr(std::io::stdin())
        .unwrap_or_else(|errno| pty_slave_fail(&format!("tcgetattr: {errno}")))
}

/// Every field of the configuration. `SpecialCodes` has no `PartialEq`, but its `Debug`
/// output lists every slot, so comparing that compares all of `c_cc`.
fn same_config(lhs: &Termios, rhs: &Termios) -> bool {
    lhs.input_modes == rhs.input_modes
        && lhs.output_modes == rhs.output_modes
        && lhs.control_modes == rhs.control_modes
        && lhs.local_modes == rhs.local_modes
        && same_line_discipline(lhs, rhs)
        && format!("{:?}", lhs.special_codes) == format!("{:?}", rhs.special_codes)
        && lhs.input_speed() == rhs.input_speed()
        && lhs.output_speed() == rhs.output_speed()
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn same_line_discipline(lhs: &Termios, rhs: &Termios) -> bool {
    lhs.line_discipline == rhs.line_discipline
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn same_line_discipline(_lhs: &Termios, _rhs: &Termios) -> bool { true }

fn check_raw_flags(raw: &Termios) {
    if raw
        .local_modes
        .intersects(LocalModes::ISIG | LocalModes::ICANON | LocalModes::ECHO)
    {
        pty_slave_fail("local modes still have ISIG, ICANON or ECHO");
    }
    if raw
        .input_modes
        .intersects(InputModes::ICRNL | InputModes::IXON | InputModes::INLCR)
    {
        pty_slave_fail("input modes still translate or flow control");
    }
    if raw.output_modes.contains(OutputModes::OPOST) {
        pty_slave_fail("output post processing still enabled");
    }
    if raw.special_codes[SpecialCodeIndex::VMIN] != 1
        || raw.special_codes[SpecialCodeIndex::VTIME] != 0
    {
        pty_slave_fail("VMIN/VTIME not set for 1 byte reads");
    }
}

fn pty_slave_entry_point() -> ! {
    let before = read_termios();

    let key_input =
        TerminalKeyInput::try_new().unwrap_or_else(|_| pty_slave_fail("no terminal"));
    let raw_mode =
        TermiosRawMode::try_new().unwrap_or_else(|_| pty_slave_fail("no terminal"));
    let mut manager = KeyboardManager::new(key_input, raw_mode);

    for _ in 0..CYCLES {
        if manager.initialize().is_err() || manager.initialize().is_err() {
            pty_slave_fail("initialize");
        }
        check_raw_flags(&read_termios());

        if manager.shutdown().is_err() || manager.shutdown().is_err() {
            pty_slave_fail("shutdown");
        }
        if !same_config(&before, &read_termios()) {
            pty_slave_fail("configuration not restored after shutdown");
        }
    }

    pty_slave_succeed(&format!("{CYCLES} initialize/shutdown cycles restored"));
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The exit path helpers restore the terminal from a [`crate::TerminalSnapshot`]
//! without going through the controller that entered raw mode: directly, and from the
//! panic hook.

use crate::{RawModeController, TermiosRawMode, generate_pty_test,
            install_panic_hook_restoring_terminal, pty_slave_fail, pty_slave_succeed,
            read_pty_slave_outcome};
use rustix::termios::{self, LocalModes};

generate_pty_test! {
    #[serial_test::serial]
    /// Run with: `cargo test -p r3bl_keyboard --lib test_snapshot_restore -- --nocapture`
    test_fn: test_snapshot_restore,
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

fn local_modes() -> LocalModes {
    termios::tcgetattr(std::io::stdin())
        .map(|termios| termios.local_modes)
        .unwrap_or_else(|errno| pty_slave_fail(&format!("tcgetattr: {errno}")))
}

fn simulated_fatal_error() { panic!("simulated fatal error"); }

fn pty_slave_entry_point() -> ! {
    let before = local_modes();

    let mut raw_mode =
        TermiosRawMode::try_new().unwrap_or_else(|_| pty_slave_fail("no terminal"));
    if raw_mode.snapshot().is_some() {
        pty_slave_fail("snapshot available before entering raw mode");
    }
    if raw_mode.enter_raw().is_err() {
        pty_slave_fail("enter_raw");
    }
    let Some(snapshot) = raw_mode.snapshot() else {
        pty_slave_fail("no snapshot after entering raw mode");
    };
    if local_modes() == before {
        pty_slave_fail("local modes did not change");
    }

    // What the panic hook and the signal restorer do.
    if snapshot.restore().is_err() {
        pty_slave_fail("snapshot restore");
    }
    if local_modes() != before {
        pty_slave_fail("local modes not restored from snapshot");
    }

    // Back to raw, then unwind through the panic hook.
    if raw_mode.restore_cooked().is_err() || raw_mode.enter_raw().is_err() {
        pty_slave_fail("second raw mode cycle");
    }
    install_panic_hook_restoring_terminal(snapshot);
    let unwound = std::panic::catch_unwind(simulated_fatal_error);
    let _unused = std::panic::take_hook();
    if unwound.is_ok() {
        pty_slave_fail("panic did not unwind");
    }
    if local_modes() != before {
        pty_slave_fail("local modes not restored by the panic hook");
    }

    let _unused = raw_mode.restore_cooked();
    pty_slave_succeed("terminal restored from snapshot and panic hook");
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{BufRead, BufReader, Read, Write};

/// Prefix of the line a PTY slave prints when its checks passed.
pub const PTY_SLAVE_SUCCESS: &str = "SUCCESS:";

/// Prefix of the line a PTY slave prints when a check failed.
pub const PTY_SLAVE_FAILED: &str = "FAILED:";

/// Report a failed check from a PTY slave and end the slave process.
pub fn pty_slave_fail(reason: &str) -> ! {
    println!("{PTY_SLAVE_FAILED} {reason}\r");
    let _unused = std::io::stdout().flush();
    std::process::exit(1);
}

/// Report success from a PTY slave and end the slave process.
pub fn pty_slave_succeed(summary: &str) -> ! {
    println!("{PTY_SLAVE_SUCCESS} {summary}\r");
    let _unused = std::io::stdout().flush();
    std::process::exit(0);
}

/// Read the slave's merged output line by line until it reports success, failure, or
/// closes the stream. Returns the success line.
///
/// # Panics
///
/// If the slave reports a failure, or never reports success.
pub fn read_pty_slave_outcome(reader: impl Read) -> String {
    let mut buf_reader = BufReader::new(reader);
    let mut slave_started = false;

    loop {
        let mut line = String::new();
        match buf_reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let trimmed = line.trim();
                eprintln!("  ← Slave output: {trimmed}");

                if trimmed.contains("SLAVE_STARTING") {
                    slave_started = true;
                }
                assert!(!trimmed.contains(PTY_SLAVE_FAILED), "Test failed: {trimmed}");
                if trimmed.contains(PTY_SLAVE_SUCCESS) {
                    assert!(slave_started, "Slave did not start properly");
                    return trimmed.to_owned();
                }
            }
            // The PTY master reports EIO once the slave side is closed.
            Err(_) => break,
        }
    }

    panic!("Slave did not report success");
}

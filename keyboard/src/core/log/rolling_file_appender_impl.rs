// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;
use tracing_appender::rolling::{self, RollingFileAppender};

/// An appender for the log file at `path` that never rotates. A relative path is
/// relative to the current directory.
///
/// Writes are synchronous. A non blocking writer could lose the lines logged right
/// before a fatal error ends the process.
///
/// # Errors
///
/// Returns an error if `path` doesn't end in a file name.
pub fn try_create_log_file_appender(path: &str) -> miette::Result<RollingFileAppender> {
    let path = Path::new(path);
    let Some(file_name) = path.file_name() else {
        return Err(miette::miette!(
            "Log file path `{}` does not name a file",
            path.display()
        ));
    };
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok(rolling::never(directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbd_log.txt");

        try_create_log_file_appender(path.to_str().unwrap()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        let report = try_create_log_file_appender("/").unwrap_err();
        assert!(report.to_string().contains("does not name a file"));
    }
}

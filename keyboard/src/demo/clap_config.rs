// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Parser, ValueEnum};
use tracing_core::LevelFilter;

#[derive(Debug, Parser)]
#[command(bin_name = "kbd")]
#[command(about = "⌨️  Line editor demo for the r3bl_keyboard input manager")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArgs {
    #[arg(
        long,
        short = 'l',
        help = "Log app output to a file (see `--log-file`) for debugging"
    )]
    pub enable_logging: bool,

    #[arg(long, default_value = "kbd_log.txt", help = "Log file path")]
    pub log_file: String,

    #[arg(long, value_enum, default_value_t = LogLevel::Debug)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cli_arg = CLIArgs::try_parse_from(["kbd"]).unwrap();
        assert!(!cli_arg.enable_logging);
        assert_eq!(cli_arg.log_file, "kbd_log.txt");
        assert_eq!(LevelFilter::from(cli_arg.log_level), LevelFilter::DEBUG);
    }

    #[test]
    fn test_logging_options() {
        let cli_arg = CLIArgs::try_parse_from([
            "kbd",
            "-l",
            "--log-file",
            "/tmp/kbd.log",
            "--log-level",
            "trace",
        ])
        .unwrap();
        assert!(cli_arg.enable_logging);
        assert_eq!(cli_arg.log_file, "/tmp/kbd.log");
        assert_eq!(cli_arg.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(CLIArgs::try_parse_from(["kbd", "--log-level", "loud"]).is_err());
    }
}

// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// While the terminal is in raw mode output post processing is turned off, so a
/// display writer will produce staircased lines. Interactive apps should log to a
/// [`WriterConfig::File`].
///
/// Fields:
/// - `writer_config`: [`WriterConfig`] to choose where to write the logs.
/// - `level_filter`: [`LevelFilter`] - The log level to use for tracing.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `tracing_log_file_path_and_prefix`: [String] is the file path and prefix to use
///   for the log file. Eg: `/tmp/kbd_log.txt` or `kbd_log.txt`.
/// - `DisplayPreference`: [`DisplayPreference`] is the preferred display to use for
///   logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path_and_prefix */),
    DisplayAndFile(
        DisplayPreference,
        String, /* tracing_log_file_path_and_prefix */
    ),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(filename: Option<String>, level_filter: LevelFilter) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| "kbd_log.txt".to_string()),
            ),
            level_filter,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    /// Logging is turned off.
    #[must_use]
    pub fn new_disabled() -> Self {
        Self {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::OFF,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_file_uses_default_name() {
        let config = TracingConfig::new_file(None, LevelFilter::TRACE);
        assert_eq!(
            config.get_writer_config(),
            WriterConfig::File("kbd_log.txt".to_string())
        );
        assert_eq!(config.get_level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_new_disabled() {
        let config = TracingConfig::new_disabled();
        assert_eq!(config.get_writer_config(), WriterConfig::None);
        assert_eq!(config.get_level_filter(), LevelFilter::OFF);
    }
}

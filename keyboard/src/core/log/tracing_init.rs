// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DisplayPreference, TracingConfig, WriterConfig, try_create_log_file_appender};
use miette::IntoDiagnostic;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, Registry, fmt, layer::SubscriberExt,
                         registry::LookupSpan, util::SubscriberInitExt};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Install the layers described by `tracing_config` as the global default subscriber.
/// Does nothing for [`WriterConfig::None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been installed.
pub fn try_initialize_logging_global(tracing_config: TracingConfig) -> miette::Result<()> {
    if tracing_config.writer_config == WriterConfig::None {
        return Ok(());
    }
    tracing_subscriber::registry()
        .with(try_create_layers(&tracing_config)?)
        .try_init()
        .into_diagnostic()
}

impl TracingConfig {
    /// Install the layers for the current thread only, until the returned guard is
    /// dropped. The global default can only be set once per process, so tests use
    /// this instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be created.
    pub fn install_thread_local(
        self,
    ) -> miette::Result<tracing::subscriber::DefaultGuard> {
        let subscriber = tracing_subscriber::registry().with(try_create_layers(&self)?);
        Ok(tracing::subscriber::set_default(subscriber))
    }
}

/// The level filter, followed by a display layer and a file layer when the
/// [`WriterConfig`] asks for them. This does not install anything.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<Registry>>>> {
    let level_filter = tracing_config.level_filter;

    let (display, file) = match &tracing_config.writer_config {
        WriterConfig::None => (None, None),
        WriterConfig::Display(preference) => (Some(*preference), None),
        WriterConfig::File(path) => (None, Some(path.as_str())),
        WriterConfig::DisplayAndFile(preference, path) => {
            (Some(*preference), Some(path.as_str()))
        }
    };

    let mut layers: Vec<Box<DynLayer<Registry>>> = vec![Box::new(level_filter)];
    if let Some(preference) = display {
        layers.push(create_display_layer(preference, level_filter));
    }
    if let Some(path) = file {
        layers.push(try_create_file_layer(path, level_filter)?);
    }
    Ok(layers)
}

/// Compact lines without timestamps, on stdout or stderr.
pub fn create_display_layer<S>(
    preference: DisplayPreference,
    level_filter: LevelFilter,
) -> Box<DynLayer<S>>
where
    S: tracing_core::Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().compact().without_time();
    match preference {
        DisplayPreference::Stdout => {
            Box::new(layer.with_writer(std::io::stdout).with_filter(level_filter))
        }
        DisplayPreference::Stderr => {
            Box::new(layer.with_writer(std::io::stderr).with_filter(level_filter))
        }
    }
}

/// Plain text (no ANSI colors) lines in the file at `path`, tagged with the thread
/// name since the signal watcher thread logs too.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_file_layer<S>(
    path: &str,
    level_filter: LevelFilter,
) -> miette::Result<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber + for<'a> LookupSpan<'a>,
{
    let appender = try_create_log_file_appender(path)?;
    Ok(Box::new(
        fmt::layer()
            .with_ansi(false)
            .with_thread_names(true)
            .with_writer(appender)
            .with_filter(level_filter),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::path::PathBuf;

    fn log_file_in(dir: &tempfile::TempDir) -> PathBuf { dir.path().join("kbd_test.log") }

    #[test]
    fn test_layer_count_follows_writer_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_in(&dir).to_string_lossy().into_owned();

        let cases = [
            (WriterConfig::Display(DisplayPreference::Stderr), 2),
            (WriterConfig::File(path.clone()), 2),
            (WriterConfig::DisplayAndFile(DisplayPreference::Stdout, path), 3),
        ];
        for (writer_config, expected) in cases {
            let tracing_config = TracingConfig {
                writer_config,
                level_filter: LevelFilter::DEBUG,
            };
            assert_eq!(try_create_layers(&tracing_config).unwrap().len(), expected);
        }
        assert!(log_file_in(&dir).exists());
    }

    #[test]
    #[serial]
    fn test_file_layer_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_file_in(&dir);

        let guard = TracingConfig::new_file(
            Some(path.to_string_lossy().into_owned()),
            LevelFilter::DEBUG,
        )
        .install_thread_local()
        .unwrap();
        tracing::debug!("raw mode entered");
        tracing::trace!("filtered out");
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("raw mode entered"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_global_init_is_noop_when_disabled() {
        assert!(try_initialize_logging_global(TracingConfig::new_disabled()).is_ok());
    }
}

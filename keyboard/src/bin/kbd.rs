// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `kbd`: a line editor demo for the keyboard manager. See [`r3bl_keyboard::demo`] for
//! the commands it understands.

use clap::Parser;
use r3bl_keyboard::{KeyboardManager, ScreenNotifier, TracingConfig,
                    demo::{CLIArgs, DemoDocument, HELP_MESSAGE, TerminalScreen,
                           run_interpreter},
                    install_panic_hook_restoring_terminal,
                    setup_default_miette_global_report_handler,
                    try_initialize_logging_global};

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

fn main() -> miette::Result<()> {
    let cli_arg = CLIArgs::parse();

    setup_default_miette_global_report_handler(ISSUES_URL);

    if cli_arg.enable_logging {
        try_initialize_logging_global(TracingConfig::new_file(
            Some(cli_arg.log_file.clone()),
            cli_arg.log_level.into(),
        ))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    // From here on, every exit path has to leave the terminal cooked. Returning early
    // with `?` is covered by the manager's `Drop`.
    let mut keyboard = KeyboardManager::new_terminal()?;
    keyboard.initialize()?;

    if let Some(snapshot) = keyboard.raw_mode().snapshot() {
        install_panic_hook_restoring_terminal(snapshot.clone());
        #[cfg(unix)]
        r3bl_keyboard::spawn_signal_restorer(snapshot)?;
    }

    let mut document = DemoDocument::default();
    let mut screen = TerminalScreen::new(std::io::stderr());
    screen.show_status_message(HELP_MESSAGE);

    let result = run_interpreter(&mut keyboard, &mut document, &mut screen);
    if let Err(report) = &result {
        tracing::error!(?report, "interpreter stopped");
    }

    keyboard.shutdown()?;
    tracing::debug!(message = "Stop logging...");
    result
}

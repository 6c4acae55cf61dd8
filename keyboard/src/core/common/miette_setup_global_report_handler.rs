// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fatal errors (terminal configuration failures, a dead input device) end the
//! session by returning a [`miette::Report`] from `main()`. This module customizes how
//! that report is printed.
//!
//! The hook is lazy: it only runs when a report is displayed, which happens after the
//! terminal has already been restored to cooked mode, so the terminal width query is
//! safe.

use miette::MietteHandlerOpts;
use tracing::debug;

/// Install the graphical report handler, sized to the terminal width at the time the
/// report is printed.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(move |_report| {
        let terminal_width = {
            let it = usize::from(
                crossterm::terminal::size()
                    .map(|(columns, _rows)| columns)
                    .unwrap_or(80),
            );
            debug!("miette::set_hook -> terminal_width: {}", it);
            it
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}

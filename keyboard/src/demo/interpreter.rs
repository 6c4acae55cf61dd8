// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::DemoDocument;
use crate::{DocumentBuffer, ESC, KeyInput, KeyboardManager, QueueOutcome,
            RawModeController, RedoOutcome, ScreenNotifier};
use tracing::debug;

pub const HELP_MESSAGE: &str =
    "i<text>ESC insert, [n]x delete, D delete line, . redo, q quit";

/// One parsed command: an optional count and the command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub count: Option<usize>,
    pub letter: u8,
}

/// Read digits (the count) up to the first non digit (the command).
///
/// # Errors
///
/// See [`KeyboardManager::next_char`].
pub fn read_command<K: KeyInput, R: RawModeController>(
    keyboard: &mut KeyboardManager<K, R>,
    screen: &mut impl ScreenNotifier,
) -> miette::Result<Command> {
    let mut count: Option<usize> = None;
    loop {
        let byte = keyboard.next_char(screen)?;
        if byte.is_ascii_digit() {
            let digit = usize::from(byte - b'0');
            count = Some(count.unwrap_or(0).saturating_mul(10).saturating_add(digit));
        } else {
            return Ok(Command {
                count,
                letter: byte,
            });
        }
    }
}

/// Run commands until `q`. The document is shown after every command that changed
/// it.
///
/// # Errors
///
/// Returns the first fatal error from [`KeyboardManager::next_char`].
pub fn run_interpreter<K: KeyInput, R: RawModeController>(
    keyboard: &mut KeyboardManager<K, R>,
    document: &mut DemoDocument,
    screen: &mut impl ScreenNotifier,
) -> miette::Result<()> {
    loop {
        keyboard.start_new_command(document);
        debug!(
            last_letter = ?keyboard.last_command_first_letter(),
            replaying = document.is_replaying(),
            "new command"
        );

        let command = read_command(keyboard, screen)?;
        match command.letter {
            b'q' => return Ok(()),
            b'i' => loop {
                let byte = keyboard.next_char(screen)?;
                if byte == ESC {
                    break;
                }
                if byte.is_ascii_graphic() || byte == b' ' {
                    document.insert(char::from(byte));
                }
            },
            b'x' => {
                document.delete_from_end(command.count.unwrap_or(1));
            }
            b'D' => {
                let expansion = format!("{}x", document.text().chars().count());
                if keyboard.queue_next(expansion, screen) == QueueOutcome::Queued {
                    debug!("line delete queued");
                }
            }
            b'.' => {
                if keyboard.redo_last_change(screen) == RedoOutcome::NothingToRedo {
                    screen.show_status_message("Nothing to redo.");
                }
            }
            other => {
                screen.show_status_message(&format!(
                    "Unknown command `{}`. {HELP_MESSAGE}",
                    other.escape_ascii()
                ));
            }
        }

        if document.changed_by_last_command() {
            screen.show_status_message(&format!("> {}", document.text()));
        }
    }
}

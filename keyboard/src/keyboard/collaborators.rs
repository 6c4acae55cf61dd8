// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The two subsystems the keyboard manager coordinates with but does not own. Both are
//! passed in per call, so the interpreter keeps ownership of its document and screen.

/// The text buffer model being edited by the interpreter.
pub trait DocumentBuffer {
    /// Whether the command that just finished mutated the document.
    fn changed_by_last_command(&self) -> bool;

    /// A new command is starting. `from_keyboard` is `false` when its input will be
    /// replayed from the push-back queue.
    fn notify_new_command(&mut self, from_keyboard: bool);
}

/// The screen renderer.
pub trait ScreenNotifier {
    /// Whether the *next* input byte comes from the physical keyboard (`true`) or from
    /// replay (`false`).
    fn notify_next_input_source(&mut self, from_keyboard: bool);

    fn show_status_message(&mut self, message: &str);
}

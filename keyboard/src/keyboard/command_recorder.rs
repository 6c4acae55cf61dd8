// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{BoundedBuffer, DocumentBuffer, PushbackQueue, QueueOutcome, ScreenNotifier};
use crate::{CMD_MAX, CMD_RECORD_CAPACITY, KeyboardError};
use tracing::{debug, warn};

/// What happened to a request to redo the last change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedoOutcome {
    /// The last change was queued for replay.
    Replaying,
    /// No command has changed the document yet.
    NothingToRedo,
    /// The change could not be queued. A status message was shown.
    Rejected,
}

/// Records every byte delivered to the interpreter, and keeps the last command that
/// changed the document around for redo.
///
/// Per command the recorder goes `Collecting -> Boundary -> Collecting`, the boundary
/// being [`Self::start_new_command`].
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    /// Bytes of the command being typed.
    command: BoundedBuffer<CMD_RECORD_CAPACITY>,
    /// The most recent finished command that changed the document. Longer than
    /// [`CMD_MAX`] if that command overflowed.
    change: BoundedBuffer<CMD_RECORD_CAPACITY>,
    last_letter: Option<char>,
}

impl CommandRecorder {
    /// Append `byte` to the current command. Once the command is
    /// [`CMD_RECORD_CAPACITY`] bytes long further bytes are not recorded, which the
    /// caller does not need to care about. Returns whether `byte` was recorded.
    pub fn record(&mut self, byte: u8) -> bool { self.command.try_push(byte).is_ok() }

    /// Close the current command and start the next one.
    ///
    /// The finished command ends at its first NUL byte, if any. Its first ASCII letter
    /// becomes [`Self::last_command_first_letter`]. If `document` reports a change, the
    /// finished command replaces the redo target. The document is then told where the
    /// next command's input comes from.
    pub fn start_new_command(
        &mut self,
        document: &mut impl DocumentBuffer,
        pushback: &PushbackQueue,
    ) {
        let finished = until_nul(self.command.as_slice());
        self.last_letter = finished
            .iter()
            .find(|byte| byte.is_ascii_alphabetic())
            .map(|&byte| char::from(byte));

        if document.changed_by_last_command() {
            let mut change = BoundedBuffer::new();
            // Can't fail, `finished` is a prefix of a buffer with the same capacity.
            if change.try_extend(finished.iter().copied()).is_ok() {
                self.change = change;
            }
            debug!(
                command = %String::from_utf8_lossy(self.change.as_slice()),
                "redo target updated"
            );
        }

        self.command.clear();
        debug!(last_letter = ?self.last_letter, "command boundary");
        document.notify_new_command(pushback.is_empty());
    }

    /// Queue the last change for replay. A change longer than [`CMD_MAX`] is never
    /// replayed in part: it is discarded and the status message
    /// `Cannot redo commands longer than 500 characters.` is shown.
    pub fn redo(
        &mut self,
        pushback: &mut PushbackQueue,
        screen: &mut impl ScreenNotifier,
    ) -> RedoOutcome {
        if let Some(error) = self.change_buffer_violation() {
            warn!(?error, "redo target discarded");
            screen.show_status_message(&error.to_string());
            self.change.clear();
            return RedoOutcome::Rejected;
        }

        if self.change.is_empty() {
            return RedoOutcome::NothingToRedo;
        }

        match pushback.push_or_report(self.change.as_slice(), screen) {
            QueueOutcome::Queued => RedoOutcome::Replaying,
            QueueOutcome::Empty => RedoOutcome::NothingToRedo,
            QueueOutcome::Rejected => RedoOutcome::Rejected,
        }
    }

    /// `None` until a command with an ASCII letter in it has finished.
    #[must_use]
    pub fn last_command_first_letter(&self) -> Option<char> { self.last_letter }

    #[must_use]
    pub fn current_command(&self) -> &[u8] { self.command.as_slice() }

    #[must_use]
    pub fn last_change(&self) -> &[u8] { self.change.as_slice() }

    /// An overflowed command is expected here. A NUL never is, since the boundary cuts
    /// the command at its first NUL, so that is only checked in debug builds.
    fn change_buffer_violation(&self) -> Option<KeyboardError> {
        let change = self.change.as_slice();
        let too_long = change.len() > CMD_MAX;
        let has_nul = cfg!(debug_assertions) && change.contains(&0);
        (too_long || has_nul).then_some(
            KeyboardError::ChangeBufferCorrupted {
                length: change.len(),
                capacity: CMD_MAX,
            },
        )
    }
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&byte| byte == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentMock, ESC, ScreenMock};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn finish(recorder: &mut CommandRecorder, command: &[u8], changed: bool) {
        for byte in command {
            recorder.record(*byte);
        }
        let mut document = DocumentMock::with_changed(changed);
        recorder.start_new_command(&mut document, &PushbackQueue::default());
    }

    #[test_case(b"3dw", Some('d') ; "count then letter")]
    #[test_case(b"x", Some('x') ; "single letter")]
    #[test_case(b"12.", None ; "digits and punctuation")]
    #[test_case(b"", None ; "empty command")]
    #[test_case(b"9\0a", None ; "letter after nul")]
    fn test_last_command_first_letter(command: &[u8], expected: Option<char>) {
        let mut recorder = CommandRecorder::default();
        finish(&mut recorder, command, false);
        assert_eq!(recorder.last_command_first_letter(), expected);
    }

    #[test]
    fn test_boundary_resets_command() {
        let mut recorder = CommandRecorder::default();
        finish(&mut recorder, b"ifoo", false);
        assert!(recorder.current_command().is_empty());

        recorder.record(b'x');
        assert_eq!(recorder.current_command(), b"x");
    }

    #[test]
    fn test_recording_keeps_one_byte_past_cmd_max() {
        let mut recorder = CommandRecorder::default();
        for _ in 0..CMD_MAX {
            assert!(recorder.record(b'a'));
        }
        assert!(recorder.record(b'b'));
        assert!(!recorder.record(b'c'));
        assert_eq!(recorder.current_command().len(), CMD_MAX + 1);
        assert_eq!(recorder.current_command().last(), Some(&b'b'));
    }

    #[test]
    fn test_change_snapshot_only_when_document_changed() {
        let mut recorder = CommandRecorder::default();

        finish(&mut recorder, b"2x", true);
        assert_eq!(recorder.last_change(), b"2x");

        finish(&mut recorder, b"j", false);
        assert_eq!(recorder.last_change(), b"2x");

        finish(&mut recorder, b"dd", true);
        assert_eq!(recorder.last_change(), b"dd");
    }

    #[test]
    fn test_boundary_notifies_document_of_input_source() {
        let mut recorder = CommandRecorder::default();
        let mut document = DocumentMock::default();
        let mut screen = ScreenMock::default();
        let mut pushback = PushbackQueue::default();

        recorder.start_new_command(&mut document, &pushback);
        pushback.push(b"x", &mut screen).unwrap();
        recorder.start_new_command(&mut document, &pushback);

        assert_eq!(document.notifications, vec![true, false]);
    }

    #[test]
    fn test_redo_with_nothing_recorded() {
        let mut recorder = CommandRecorder::default();
        let mut pushback = PushbackQueue::default();
        let mut screen = ScreenMock::default();

        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::NothingToRedo
        );
        assert!(pushback.is_empty());
        assert!(screen.messages.is_empty());
        assert!(screen.sources.is_empty());
    }

    #[test]
    fn test_redo_queues_last_change() {
        let mut recorder = CommandRecorder::default();
        let mut pushback = PushbackQueue::default();
        let mut screen = ScreenMock::default();
        finish(&mut recorder, b"3x", true);

        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::Replaying
        );
        assert_eq!(pushback.pop(), Some(b'3'));
        assert_eq!(pushback.pop(), Some(b'x'));
        assert_eq!(pushback.pop(), None);
        assert_eq!(screen.sources, vec![false]);
    }

    #[test]
    fn test_redo_rejected_when_queue_is_full() {
        let mut recorder = CommandRecorder::default();
        let mut pushback = PushbackQueue::default();
        let mut screen = ScreenMock::default();
        finish(&mut recorder, b"x", true);
        pushback.push(&[b'j'; CMD_MAX], &mut screen).unwrap();

        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::Rejected
        );
        assert_eq!(pushback.len(), CMD_MAX);
        assert_eq!(screen.messages, vec!["Pushed commands are too long."]);
        assert_eq!(recorder.last_change(), b"x");
    }

    #[test]
    fn test_redo_of_cmd_max_command_replays_all_of_it() {
        let mut recorder = CommandRecorder::default();
        let mut pushback = PushbackQueue::default();
        let mut screen = ScreenMock::default();
        let mut command = vec![b'i'];
        command.extend([b'a'; CMD_MAX - 2]);
        command.push(ESC);
        finish(&mut recorder, &command, true);

        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::Replaying
        );
        assert_eq!(pushback.len(), CMD_MAX);
        assert!(screen.messages.is_empty());
    }

    #[test]
    fn test_redo_of_overflowed_command_queues_nothing() {
        let mut recorder = CommandRecorder::default();
        let mut pushback = PushbackQueue::default();
        let mut screen = ScreenMock::default();
        let mut command = vec![b'i'];
        command.extend([b'a'; 600]);
        command.push(ESC);
        finish(&mut recorder, &command, true);
        assert_eq!(recorder.last_change().len(), CMD_MAX + 1);

        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::Rejected
        );
        assert!(pushback.is_empty());
        assert!(screen.sources.is_empty());
        assert_eq!(
            screen.messages,
            vec!["Cannot redo commands longer than 500 characters."]
        );
        assert!(recorder.last_change().is_empty());

        // Discarded, so a second redo has nothing left to do.
        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::NothingToRedo
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_redo_discards_corrupted_change_buffer() {
        let mut recorder = CommandRecorder::default();
        let mut pushback = PushbackQueue::default();
        let mut screen = ScreenMock::default();
        recorder.change.try_extend(b"a\0b".iter().copied()).unwrap();

        assert_eq!(
            recorder.redo(&mut pushback, &mut screen),
            RedoOutcome::Rejected
        );
        assert!(recorder.last_change().is_empty());
        assert!(pushback.is_empty());
        assert_eq!(
            screen.messages,
            vec!["Cannot redo commands longer than 500 characters."]
        );
    }
}

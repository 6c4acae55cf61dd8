// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{BoundedBuffer, ScreenNotifier};
use crate::{CMD_MAX, KeyboardError};
use tracing::warn;

/// What happened to a request to queue bytes for replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOutcome {
    /// The bytes were queued and will be read before any further keystroke.
    Queued,
    /// Nothing to queue. No notification was sent.
    Empty,
    /// The queue would overflow. It was left unchanged and the status message shown.
    Rejected,
}

/// Bytes that must be delivered to the reader before any further physical keystroke.
///
/// Stored as a stack: a pushed string goes in reversed, so popping yields it in its
/// original order. Strings pushed later are consumed before strings pushed earlier.
///
/// ```
/// use r3bl_keyboard::{PushbackQueue, ScreenMock};
///
/// let mut screen = ScreenMock::default();
/// let mut queue = PushbackQueue::default();
/// queue.push(b"dw", &mut screen).unwrap();
/// queue.push(b"3", &mut screen).unwrap();
///
/// let popped: Vec<u8> = std::iter::from_fn(|| queue.pop()).collect();
/// assert_eq!(popped, b"3dw");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PushbackQueue {
    stack: BoundedBuffer<CMD_MAX>,
}

impl PushbackQueue {
    /// Queue `text` ahead of live input, and tell the screen that the next input is
    /// replayed. Returns the number of bytes queued. Pushing nothing is a no-op and
    /// sends no notification.
    ///
    /// # Errors
    ///
    /// Returns [`KeyboardError::PushbackOverflow`] if the pending bytes plus `text`
    /// exceed [`CMD_MAX`]. Nothing is queued in that case.
    pub fn push(
        &mut self,
        text: &[u8],
        screen: &mut impl ScreenNotifier,
    ) -> Result<usize, KeyboardError> {
        if text.is_empty() {
            return Ok(0);
        }

        self.stack
            .try_extend(text.iter().rev().copied())
            .map_err(|_| KeyboardError::PushbackOverflow {
                requested: text.len(),
                pending: self.stack.len(),
                capacity: CMD_MAX,
            })?;

        screen.notify_next_input_source(false);
        Ok(text.len())
    }

    /// [`Self::push`], with an overflow turned into a status message.
    pub fn push_or_report(
        &mut self,
        text: &[u8],
        screen: &mut impl ScreenNotifier,
    ) -> QueueOutcome {
        match self.push(text, screen) {
            Ok(0) => QueueOutcome::Empty,
            Ok(_) => QueueOutcome::Queued,
            Err(error) => {
                warn!(?error, "push-back rejected");
                screen.show_status_message(&error.to_string());
                QueueOutcome::Rejected
            }
        }
    }

    /// The next byte to deliver, or `None` if nothing is pending.
    pub fn pop(&mut self) -> Option<u8> { self.stack.pop() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    #[must_use]
    pub fn len(&self) -> usize { self.stack.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScreenMock;
    use pretty_assertions::assert_eq;

    fn drain(queue: &mut PushbackQueue) -> Vec<u8> {
        std::iter::from_fn(|| queue.pop()).collect()
    }

    #[test]
    fn test_push_pops_in_original_order() {
        let mut screen = ScreenMock::default();
        let mut queue = PushbackQueue::default();

        assert_eq!(queue.push(b"ihello", &mut screen).unwrap(), 6);
        assert_eq!(queue.len(), 6);
        assert_eq!(screen.sources, vec![false]);
        assert_eq!(drain(&mut queue), b"ihello");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_later_push_is_consumed_first() {
        let mut screen = ScreenMock::default();
        let mut queue = PushbackQueue::default();

        queue.push(b"abc", &mut screen).unwrap();
        queue.push(b"xy", &mut screen).unwrap();
        assert_eq!(drain(&mut queue), b"xyabc");
    }

    #[test]
    fn test_empty_push_sends_no_notification() {
        let mut screen = ScreenMock::default();
        let mut queue = PushbackQueue::default();

        assert_eq!(queue.push_or_report(b"", &mut screen), QueueOutcome::Empty);
        assert!(queue.is_empty());
        assert!(screen.sources.is_empty());
        assert!(screen.messages.is_empty());
    }

    #[test]
    fn test_overflow_leaves_queue_unchanged() {
        let mut screen = ScreenMock::default();
        let mut queue = PushbackQueue::default();

        let first = vec![b'a'; CMD_MAX - 3];
        queue.push(&first, &mut screen).unwrap();
        let before = queue.clone();

        let result = queue.push(b"wxyz", &mut screen);
        assert!(matches!(
            result,
            Err(KeyboardError::PushbackOverflow {
                requested: 4,
                pending: 497,
                capacity: CMD_MAX,
            })
        ));
        assert_eq!(queue, before);
        assert_eq!(screen.sources, vec![false]);

        // Exactly filling the queue is fine.
        queue.push(b"xyz", &mut screen).unwrap();
        assert_eq!(queue.len(), CMD_MAX);
    }

    #[test]
    fn test_overflow_is_reported_as_status_message() {
        let mut screen = ScreenMock::default();
        let mut queue = PushbackQueue::default();

        let too_long = vec![b'j'; CMD_MAX + 1];
        assert_eq!(
            queue.push_or_report(&too_long, &mut screen),
            QueueOutcome::Rejected
        );
        assert!(queue.is_empty());
        assert_eq!(screen.messages, vec!["Pushed commands are too long."]);
        assert!(screen.sources.is_empty());
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A fixed capacity byte buffer on the stack. Every write is bounds checked and
//! returns [`CapacityExceeded`] instead of writing past the end, and a rejected write
//! leaves the buffer untouched.

use smallvec::SmallVec;
use std::fmt::{Debug, Formatter};

/// Returned when a write would make a [`BoundedBuffer`] longer than its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub requested: usize,
    pub available: usize,
}

#[derive(Clone, PartialEq, Eq)]
pub struct BoundedBuffer<const N: usize> {
    inner: SmallVec<[u8; N]>,
}

impl<const N: usize> Default for BoundedBuffer<N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> Debug for BoundedBuffer<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BoundedBuffer<{N}>({:?})",
            String::from_utf8_lossy(self.as_slice())
        )
    }
}

impl<const N: usize> BoundedBuffer<N> {
    pub const CAPACITY: usize = N;

    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.inner.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    #[must_use]
    pub fn is_full(&self) -> bool { self.inner.len() == N }

    #[must_use]
    pub fn remaining_capacity(&self) -> usize { N - self.inner.len() }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] { self.inner.as_slice() }

    /// Rewind to empty. The storage is reused.
    pub fn clear(&mut self) { self.inner.clear(); }

    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if the buffer is full.
    pub fn try_push(&mut self, byte: u8) -> Result<(), CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                requested: 1,
                available: 0,
            });
        }
        self.inner.push(byte);
        Ok(())
    }

    /// Append every byte of `bytes`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] if all of `bytes` don't fit.
    pub fn try_extend<I>(&mut self, bytes: I) -> Result<(), CapacityExceeded>
    where
        I: IntoIterator<Item = u8>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = bytes.into_iter();
        let requested = iter.len();
        let available = self.remaining_capacity();
        if requested > available {
            return Err(CapacityExceeded {
                requested,
                available,
            });
        }
        self.inner.extend(iter);
        Ok(())
    }

    /// Remove and return the last byte.
    pub fn pop(&mut self) -> Option<u8> { self.inner.pop() }

    /// Overwrite the contents with those of `other`. Both share a capacity, so this
    /// can't fail.
    pub fn copy_from(&mut self, other: &BoundedBuffer<N>) {
        self.inner.clear();
        self.inner.extend_from_slice(other.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_until_full() {
        let mut buffer = BoundedBuffer::<3>::new();
        assert!(buffer.is_empty());

        for byte in b"abc" {
            buffer.try_push(*byte).unwrap();
        }
        assert!(buffer.is_full());
        assert_eq!(buffer.remaining_capacity(), 0);

        assert_eq!(
            buffer.try_push(b'd'),
            Err(CapacityExceeded {
                requested: 1,
                available: 0,
            })
        );
        assert_eq!(buffer.as_slice(), b"abc");
    }

    #[test]
    fn test_try_extend_is_all_or_nothing() {
        let mut buffer = BoundedBuffer::<4>::new();
        buffer.try_extend(b"ab".iter().copied()).unwrap();

        let result = buffer.try_extend(b"cde".iter().copied());
        assert_eq!(
            result,
            Err(CapacityExceeded {
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(buffer.as_slice(), b"ab");

        buffer.try_extend(b"cd".iter().copied()).unwrap();
        assert_eq!(buffer.as_slice(), b"abcd");
    }

    #[test]
    fn test_pop_and_clear() {
        let mut buffer = BoundedBuffer::<4>::new();
        buffer.try_extend(b"xy".iter().copied()).unwrap();
        assert_eq!(buffer.pop(), Some(b'y'));
        assert_eq!(buffer.len(), 1);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn test_copy_from_overwrites() {
        let mut source = BoundedBuffer::<8>::new();
        source.try_extend(b"3dw".iter().copied()).unwrap();

        let mut target = BoundedBuffer::<8>::new();
        target.try_extend(b"previous".iter().copied()).unwrap();
        target.copy_from(&source);

        assert_eq!(target, source);
        assert_eq!(format!("{target:?}"), "BoundedBuffer<8>(\"3dw\")");
    }
}

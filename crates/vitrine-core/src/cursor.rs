#![forbid(unsafe_code)]

//! Bounded, wrapping index over a fixed-length sequence.
//!
//! # Invariants
//!
//! 1. `index < len` at all times; `len >= 1` is enforced by [`NonZeroUsize`].
//! 2. [`IndexCursor::advance`] is total and wraps in both directions.
//! 3. [`IndexCursor::jump_to`] never clamps: an out-of-range target fails
//!    with [`NavigationError::InvalidIndex`] and leaves the cursor unchanged.

use std::num::NonZeroUsize;

use crate::error::NavigationError;

/// Step direction for [`IndexCursor::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `+1`, wrapping from the last item to the first.
    Forward,
    /// `-1`, wrapping from the first item to the last.
    Backward,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// A position within a sequence of `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCursor {
    index: usize,
    len: NonZeroUsize,
}

impl IndexCursor {
    /// Create a cursor at index 0.
    #[must_use]
    pub const fn new(len: NonZeroUsize) -> Self {
        Self { index: 0, len }
    }

    /// Current index.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Length of the underlying sequence.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> NonZeroUsize {
        self.len
    }

    /// Whether the cursor sits on the first item.
    #[inline]
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Whether the cursor sits on the last item.
    #[inline]
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.index + 1 == self.len.get()
    }

    /// Step one item in `direction`, wrapping at either end.
    ///
    /// Returns the new index.
    pub fn advance(&mut self, direction: Direction) -> usize {
        let len = self.len.get();
        self.index = match direction {
            Direction::Forward if self.index + 1 == len => 0,
            Direction::Forward => self.index + 1,
            Direction::Backward if self.index == 0 => len - 1,
            Direction::Backward => self.index - 1,
        };
        self.index
    }

    /// Step `steps` items forward in one move, wrapping as often as needed.
    ///
    /// Equivalent to `steps` calls to `advance(Direction::Forward)`.
    pub fn advance_by(&mut self, steps: u64) -> usize {
        let len = self.len.get();
        // Both operands of the final addition are below `len`.
        let steps = usize::try_from(steps).map_or_else(
            |_| (u128::from(steps) % len as u128) as usize,
            |steps| steps % len,
        );
        let remaining = len - self.index;
        self.index = if steps < remaining {
            self.index + steps
        } else {
            steps - remaining
        };
        self.index
    }

    /// Jump directly to `index`.
    ///
    /// Returns the new index, or [`NavigationError::InvalidIndex`] if
    /// `index >= len`.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, NavigationError> {
        if index >= self.len.get() {
            return Err(NavigationError::InvalidIndex {
                index,
                len: self.len.get(),
            });
        }
        self.index = index;
        Ok(index)
    }
}

#![forbid(unsafe_code)]

//! Immutable, non-empty item sequences.
//!
//! A [`Sequence`] is the externally supplied list a carousel navigates:
//! hero images for the page carousel, gallery entries for a detail record.
//! Storage is shared, so cloning a sequence (for example to hand a record's
//! gallery to a freshly opened modal) never copies the items.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Index;
use std::sync::Arc;

use crate::error::NavigationError;

/// An immutable ordered list with at least one item.
pub struct Sequence<T> {
    items: Arc<[T]>,
}

impl<T> Sequence<T> {
    /// Build a sequence, rejecting an empty list.
    pub fn new(items: impl Into<Vec<T>>) -> Result<Self, NavigationError> {
        let items: Vec<T> = items.into();
        if items.is_empty() {
            return Err(NavigationError::EmptySequence);
        }
        Ok(Self {
            items: items.into(),
        })
    }

    /// Number of items. Never zero.
    #[inline]
    #[must_use]
    pub fn len(&self) -> NonZeroUsize {
        // Construction rejects empty input.
        NonZeroUsize::new(self.items.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Item at `index`, or `None` when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// First item.
    #[inline]
    #[must_use]
    pub fn first(&self) -> &T {
        &self.items[0]
    }

    /// Iterate the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> TryFrom<Vec<T>> for Sequence<T> {
    type Error = NavigationError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(items)
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

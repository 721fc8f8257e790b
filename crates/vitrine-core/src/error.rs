#![forbid(unsafe_code)]

//! Navigation errors.

use std::fmt;

/// Errors produced by cursor and sequence operations.
///
/// Both variants are caller programming errors: a UI that only offers
/// valid indices and never builds an empty carousel will not see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// A jump targeted an index outside `[0, len)`.
    InvalidIndex { index: usize, len: usize },
    /// A sequence was built from zero items.
    EmptySequence,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::EmptySequence => write!(f, "sequence must contain at least one item"),
        }
    }
}

impl std::error::Error for NavigationError {}

#![forbid(unsafe_code)]

//! Runtime errors.

use std::fmt;

use vitrine_core::NavigationError;

/// Autoplay scheduling failures.
///
/// Both variants are configuration errors: they are reported once from
/// `start` and never retried.
#[derive(Debug)]
pub enum TimerError {
    /// A zero interval would tick without bound.
    ZeroInterval,
    /// The host refused to spawn the ticker thread.
    Spawn(std::io::Error),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval => write!(f, "autoplay interval must be non-zero"),
            Self::Spawn(e) => write!(f, "failed to spawn autoplay ticker: {e}"),
        }
    }
}

impl std::error::Error for TimerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ZeroInterval => None,
            Self::Spawn(e) => Some(e),
        }
    }
}

/// Any error surfaced by a controller, modal session, or page.
#[derive(Debug)]
pub enum EngineError {
    /// Out-of-range jump or empty sequence.
    Navigation(NavigationError),
    /// Autoplay could not be scheduled.
    Timer(TimerError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigation(e) => write!(f, "navigation error: {e}"),
            Self::Timer(e) => write!(f, "timer error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Navigation(e) => Some(e),
            Self::Timer(e) => Some(e),
        }
    }
}

impl From<NavigationError> for EngineError {
    fn from(e: NavigationError) -> Self {
        Self::Navigation(e)
    }
}

impl From<TimerError> for EngineError {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}

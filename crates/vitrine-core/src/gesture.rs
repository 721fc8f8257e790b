#![forbid(unsafe_code)]

//! Swipe recognition: turns horizontal pointer/touch samples into a
//! navigation intent.
//!
//! [`SwipeTracker`] records the x-coordinate where a pointer went down and
//! the latest x-coordinate it moved to. On release it compares the travelled
//! distance against a fixed threshold and emits a [`SwipeIntent`].
//!
//! # State Machine
//!
//! ```text
//!   Idle ──on_start(x)──▶ Pressed ──on_move(x)──▶ Dragging
//!    ▲                       │                       │
//!    └──────── on_end() / cancel() ◀─────────────────┘
//! ```
//!
//! Moves only update the preview position; the decision is made once, in
//! [`SwipeTracker::on_end`].
//!
//! # Invariants
//!
//! 1. `on_end()` returns [`SwipeIntent::None`] unless both a start and a
//!    current coordinate were recorded since the last reset.
//! 2. `on_end()` and `cancel()` always clear both coordinates, whatever the
//!    outcome, so one gesture never leaks into the next.
//! 3. A leftward drag (start > current) beyond the threshold means `Next`;
//!    a rightward drag beyond the threshold means `Previous`.
//!
//! # Failure Modes
//!
//! - Non-finite coordinates (NaN, ±∞) are dropped as if never reported, so a
//!   malformed sample resolves to `None` instead of failing.
//! - A distance exactly equal to the threshold is not a swipe.

/// Default swipe distance threshold, in host distance units (CSS pixels on
/// the web, logical pixels elsewhere).
pub const DEFAULT_THRESHOLD: f32 = 50.0;

/// Swipe detection thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Minimum absolute horizontal travel for a swipe (default: 50.0).
    pub threshold: f32,
}

impl SwipeConfig {
    /// Create a config with the given threshold.
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Navigation intent resolved from a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipeIntent {
    /// Advance to the next item.
    Next,
    /// Go back to the previous item.
    Previous,
    /// Too short, or incomplete: no navigation.
    #[default]
    None,
}

impl SwipeIntent {
    /// Whether this intent changes the current index.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Ephemeral pointer coordinates for the gesture in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Where the pointer went down.
    pub start_x: Option<f32>,
    /// Where the pointer last moved to.
    pub current_x: Option<f32>,
}

impl GestureSample {
    /// Whether no coordinate is recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_x.is_none() && self.current_x.is_none()
    }

    /// Signed horizontal travel, `start_x - current_x`, when both are set.
    #[must_use]
    pub fn distance(&self) -> Option<f32> {
        match (self.start_x, self.current_x) {
            (Some(start), Some(current)) => Some(start - current),
            _ => None,
        }
    }
}

/// Stateful swipe recognizer.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    config: SwipeConfig,
    sample: GestureSample,
}

impl SwipeTracker {
    /// Create a tracker with the given thresholds.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            sample: GestureSample::default(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Coordinates recorded so far.
    #[must_use]
    pub fn sample(&self) -> &GestureSample {
        &self.sample
    }

    /// Whether a gesture is in flight.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.sample.start_x.is_some()
    }

    /// Pointer/touch went down at `x`.
    ///
    /// Starting again while a gesture is in flight restarts the sample.
    pub fn on_start(&mut self, x: f32) {
        self.sample = GestureSample {
            start_x: finite(x),
            current_x: None,
        };
    }

    /// Pointer/touch moved to `x`. No decision is made here.
    pub fn on_move(&mut self, x: f32) {
        if let Some(x) = finite(x) {
            self.sample.current_x = Some(x);
        }
    }

    /// Pointer/touch released: resolve the intent and reset.
    pub fn on_end(&mut self) -> SwipeIntent {
        let sample = std::mem::take(&mut self.sample);
        let intent = match sample.distance() {
            Some(distance) if distance > self.config.threshold => SwipeIntent::Next,
            Some(distance) if distance < -self.config.threshold => SwipeIntent::Previous,
            _ => SwipeIntent::None,
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            start_x = ?sample.start_x,
            current_x = ?sample.current_x,
            threshold = self.config.threshold,
            ?intent,
            "swipe resolved"
        );

        intent
    }

    /// Discard the gesture in flight without resolving it.
    pub fn cancel(&mut self) {
        self.sample = GestureSample::default();
    }
}

fn finite(x: f32) -> Option<f32> {
    x.is_finite().then_some(x)
}

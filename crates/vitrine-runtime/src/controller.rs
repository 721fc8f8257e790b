#![forbid(unsafe_code)]

//! Carousel controller: one navigable unit over a [`Sequence`].
//!
//! A [`CarouselController`] composes an [`IndexCursor`], an
//! [`AutoplayTimer`], and a [`SwipeTracker`]. The page carousel and every
//! gallery carousel are instances of this one type; they differ only in
//! their [`CarouselOptions`] (autoplay on for the page, off for galleries).
//!
//! # Invariants
//!
//! 1. `current_index() < len()` at all times.
//! 2. Autoplay is a one-way latch. Once any manual navigation (`next`,
//!    `previous`, a resolving `go_to`, or a swipe that resolves to a
//!    direction) happens, the timer is stopped and no later tick advances
//!    the cursor for the lifetime of the controller.
//! 3. A swipe that resolves to [`SwipeIntent::None`] changes nothing,
//!    autoplay included.
//! 4. A rejected `go_to` changes nothing, autoplay included.
//! 5. Observers run after every accepted mutation, in registration order.
//!
//! # Teardown
//!
//! [`CarouselController::unmount`] stops the timer synchronously (joining
//! the ticker thread if there is one), discards any in-flight gesture, and
//! latches autoplay off. Dropping a controller unmounts it.

use std::fmt;

use vitrine_core::{
    AutoplayPolicy, Direction, IndexCursor, NavEvent, NavKey, NavigationError, Sequence,
    SwipeConfig, SwipeIntent, SwipeTracker,
};
use web_time::Duration;

use crate::autoplay::{AutoplayTimer, TimerBackend};
use crate::error::TimerError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Construction-time configuration for a [`CarouselController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselOptions {
    /// Autoplay policy (page carousel: enabled, gallery: disabled).
    pub autoplay: AutoplayPolicy,
    /// Swipe thresholds.
    pub swipe: SwipeConfig,
    /// Tick source for autoplay.
    pub backend: TimerBackend,
    /// Name used in log records.
    pub label: &'static str,
}

impl CarouselOptions {
    /// Page carousel defaults: rotate every 5000 ms.
    #[must_use]
    pub fn primary() -> Self {
        Self {
            autoplay: AutoplayPolicy::default(),
            swipe: SwipeConfig::default(),
            backend: TimerBackend::default(),
            label: "primary",
        }
    }

    /// Gallery carousel defaults: manual navigation only.
    #[must_use]
    pub fn gallery() -> Self {
        Self {
            autoplay: AutoplayPolicy::Disabled,
            label: "gallery",
            ..Self::primary()
        }
    }

    /// Set the autoplay policy.
    #[must_use]
    pub fn autoplay(mut self, policy: AutoplayPolicy) -> Self {
        self.autoplay = policy;
        self
    }

    /// Set swipe thresholds.
    #[must_use]
    pub fn swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    /// Set the timer backend.
    #[must_use]
    pub fn backend(mut self, backend: TimerBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the log label.
    #[must_use]
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self::primary()
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Autoplay latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayState {
    enabled: bool,
    interval: Option<Duration>,
}

impl AutoplayState {
    fn from_policy(policy: AutoplayPolicy) -> Self {
        Self {
            enabled: policy.is_enabled(),
            interval: policy.interval(),
        }
    }

    /// Whether autoplay may still advance the carousel.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Configured interval, if the carousel was built with autoplay.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

/// Why the current index changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCause {
    /// An autoplay tick.
    Autoplay,
    /// `next()`, a leftward swipe, or the right arrow key.
    Next,
    /// `previous()`, a rightward swipe, or the left arrow key.
    Previous,
    /// `go_to(i)`.
    Jump,
}

impl NavCause {
    /// Whether the change came from the user.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        !matches!(self, Self::Autoplay)
    }
}

/// Payload delivered to observers after an accepted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavChange {
    /// New current index.
    pub index: usize,
    /// What caused it.
    pub cause: NavCause,
    /// Revision after the change.
    pub revision: u64,
}

/// Read-only view of a controller for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSnapshot {
    pub index: usize,
    pub len: usize,
    pub autoplay_enabled: bool,
    pub revision: u64,
}

type Observer = Box<dyn FnMut(&NavChange)>;

// ---------------------------------------------------------------------------
// CarouselController
// ---------------------------------------------------------------------------

/// A navigable carousel over an immutable sequence.
pub struct CarouselController<T> {
    items: Sequence<T>,
    cursor: IndexCursor,
    autoplay: AutoplayState,
    timer: AutoplayTimer,
    swipe: SwipeTracker,
    observers: Vec<Observer>,
    revision: u64,
    label: &'static str,
}

impl<T> fmt::Debug for CarouselController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("label", &self.label)
            .field("index", &self.cursor.index())
            .field("len", &self.cursor.len())
            .field("autoplay", &self.autoplay)
            .field("timer", &self.timer)
            .field("swipe", &self.swipe)
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl<T> CarouselController<T> {
    /// Build a controller at index 0 and, when the policy enables it,
    /// start autoplay.
    pub fn new(items: Sequence<T>, options: CarouselOptions) -> Result<Self, TimerError> {
        let mut controller = Self {
            cursor: IndexCursor::new(items.len()),
            items,
            autoplay: AutoplayState::from_policy(options.autoplay),
            timer: AutoplayTimer::new(options.backend),
            swipe: SwipeTracker::new(options.swipe),
            observers: Vec::new(),
            revision: 0,
            label: options.label,
        };
        if let Some(interval) = options.autoplay.interval() {
            controller.start_autoplay(interval)?;
        }
        tracing::debug!(
            carousel = controller.label,
            len = controller.len(),
            autoplay = controller.autoplay.enabled,
            "carousel mounted"
        );
        Ok(controller)
    }

    /// Replace the autoplay timer (for example with a custom tick source).
    ///
    /// The running schedule, if any, is restarted on the new timer.
    pub fn with_timer(mut self, timer: AutoplayTimer) -> Result<Self, TimerError> {
        let interval = self.timer.interval();
        self.timer.stop();
        self.timer = timer;
        if let Some(interval) = interval {
            self.timer.start(interval)?;
        }
        Ok(self)
    }

    // --- Accessors ---

    /// Item at the current index.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.items[self.cursor.index()]
    }

    /// Current index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursor.len().get()
    }

    /// Always `false`: a carousel is never built over an empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The navigated items.
    #[must_use]
    pub fn items(&self) -> &Sequence<T> {
        &self.items
    }

    /// Autoplay latch state.
    #[must_use]
    pub fn autoplay(&self) -> AutoplayState {
        self.autoplay
    }

    /// Whether autoplay may still advance the carousel.
    #[must_use]
    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.enabled
    }

    /// Whether the autoplay timer is scheduled.
    #[must_use]
    pub fn autoplay_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Number of accepted mutations so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether a swipe is in flight.
    #[must_use]
    pub fn is_tracking_gesture(&self) -> bool {
        self.swipe.is_tracking()
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            index: self.cursor.index(),
            len: self.len(),
            autoplay_enabled: self.autoplay.enabled,
            revision: self.revision,
        }
    }

    /// Register an observer called after every accepted mutation.
    pub fn on_change(&mut self, observer: impl FnMut(&NavChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // --- Autoplay ---

    /// Start (or restart) autoplay at `interval`.
    ///
    /// Returns `Ok(false)` without scheduling anything once autoplay has been
    /// silenced, or when the controller was built with autoplay disabled.
    pub fn start_autoplay(&mut self, interval: Duration) -> Result<bool, TimerError> {
        if !self.autoplay.enabled {
            tracing::debug!(carousel = self.label, "autoplay start ignored: silenced");
            return Ok(false);
        }
        self.timer.start(interval)?;
        self.autoplay.interval = Some(interval);
        Ok(true)
    }

    /// Advance by one tick's worth, as the host's own scheduler would.
    ///
    /// Returns `true` if the cursor moved.
    pub fn autoplay_tick(&mut self) -> bool {
        if !self.autoplay.enabled {
            return false;
        }
        let index = self.cursor.advance(Direction::Forward);
        self.notify(index, NavCause::Autoplay);
        true
    }

    /// Feed elapsed time to the autoplay timer and apply any due ticks.
    ///
    /// Thread-backed timers ignore `elapsed` and apply the ticks they have
    /// posted. However many intervals were missed, they are applied as one
    /// move with a single observer notification. Returns the number of
    /// intervals that fell due.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        if !self.autoplay.enabled {
            return 0;
        }
        let due = self.timer.due(elapsed);
        if due > 0 {
            let index = self.cursor.advance_by(u64::from(due));
            self.notify(index, NavCause::Autoplay);
        }
        due
    }

    /// Apply ticks posted by a thread-backed timer.
    pub fn poll_autoplay(&mut self) -> u32 {
        self.tick(Duration::ZERO)
    }

    fn silence_autoplay(&mut self) {
        if self.autoplay.enabled {
            self.autoplay.enabled = false;
            self.timer.stop();
            tracing::debug!(carousel = self.label, "autoplay silenced by user navigation");
        }
    }

    // --- Navigation ---

    /// Go to the next item (wrapping). Silences autoplay.
    pub fn next(&mut self) -> usize {
        self.step(Direction::Forward)
    }

    /// Go to the previous item (wrapping). Silences autoplay.
    pub fn previous(&mut self) -> usize {
        self.step(Direction::Backward)
    }

    /// Jump to `index`. Silences autoplay.
    ///
    /// Out-of-range targets fail with [`NavigationError::InvalidIndex`] and
    /// leave both the index and autoplay untouched.
    pub fn go_to(&mut self, index: usize) -> Result<usize, NavigationError> {
        if index >= self.len() {
            tracing::warn!(
                carousel = self.label,
                index,
                len = self.len(),
                "rejected out-of-range jump"
            );
            return Err(NavigationError::InvalidIndex {
                index,
                len: self.len(),
            });
        }
        self.silence_autoplay();
        let index = self.cursor.jump_to(index)?;
        self.notify(index, NavCause::Jump);
        Ok(index)
    }

    fn step(&mut self, direction: Direction) -> usize {
        self.silence_autoplay();
        let index = self.cursor.advance(direction);
        let cause = match direction {
            Direction::Forward => NavCause::Next,
            Direction::Backward => NavCause::Previous,
        };
        self.notify(index, cause);
        index
    }

    // --- Gestures ---

    /// Pointer/touch went down.
    pub fn gesture_start(&mut self, x: f32) {
        self.swipe.on_start(x);
    }

    /// Pointer/touch moved.
    pub fn gesture_move(&mut self, x: f32) {
        self.swipe.on_move(x);
    }

    /// Pointer/touch released: resolve the swipe and navigate.
    ///
    /// [`SwipeIntent::None`] is a no-op and leaves autoplay running.
    pub fn handle_gesture_end(&mut self) -> SwipeIntent {
        let intent = self.swipe.on_end();
        match intent {
            SwipeIntent::Next => {
                self.next();
            }
            SwipeIntent::Previous => {
                self.previous();
            }
            SwipeIntent::None => {}
        }
        intent
    }

    /// Discard the gesture in flight.
    pub fn cancel_gesture(&mut self) {
        self.swipe.cancel();
    }

    // --- Events ---

    /// Route a single input event.
    ///
    /// Returns `Ok(true)` if the current index was (re)set. Escape is not a
    /// carousel key and returns `Ok(false)`.
    pub fn handle_event(&mut self, event: &NavEvent) -> Result<bool, NavigationError> {
        let changed = match *event {
            NavEvent::PointerDown { x } => {
                self.gesture_start(x);
                false
            }
            NavEvent::PointerMove { x } => {
                self.gesture_move(x);
                false
            }
            NavEvent::PointerUp => self.handle_gesture_end().is_navigation(),
            NavEvent::PointerCancel => {
                self.cancel_gesture();
                false
            }
            NavEvent::Next | NavEvent::Key(NavKey::Right) => {
                self.next();
                true
            }
            NavEvent::Previous | NavEvent::Key(NavKey::Left) => {
                self.previous();
                true
            }
            NavEvent::GoTo(index) => {
                self.go_to(index)?;
                true
            }
            NavEvent::Key(NavKey::Escape) => false,
        };
        Ok(changed)
    }

    fn notify(&mut self, index: usize, cause: NavCause) {
        self.revision += 1;
        let change = NavChange {
            index,
            cause,
            revision: self.revision,
        };
        tracing::debug!(carousel = self.label, index, ?cause, "carousel index changed");
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    // --- Teardown ---

    /// Tear the carousel down: stop the timer, discard any gesture in
    /// flight, and latch autoplay off. Idempotent.
    ///
    /// Items stay readable, and manual navigation keeps working.
    pub fn unmount(&mut self) {
        self.autoplay.enabled = false;
        self.timer.stop();
        self.swipe.cancel();
        tracing::debug!(carousel = self.label, "carousel unmounted");
    }
}

impl<T> Drop for CarouselController<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#![forbid(unsafe_code)]

//! Autoplay scheduling.
//!
//! An [`AutoplayTimer`] owns at most one recurring schedule. The schedule
//! itself comes from a [`TickSource`]:
//!
//! - [`ElapsedClock`] is deterministic. The host reports elapsed time on
//!   every frame (or a test reports it directly) and the clock answers how
//!   many whole intervals became due.
//! - [`ThreadTicker`](crate::ticker::ThreadTicker) waits on a background
//!   thread and posts ticks to a channel the owner drains.
//!
//! # Invariants
//!
//! 1. `start()` always cancels the previous schedule first, so at most one
//!    schedule is ever active.
//! 2. `stop()` is idempotent and synchronous: once it returns, `due()`
//!    reports zero until the next `start()`.
//! 3. Fractional progress toward the next tick is kept across `due()` calls
//!    and discarded by `stop()`.

use std::fmt;

use web_time::Duration;

use crate::error::TimerError;
use crate::ticker::ThreadTicker;

/// A recurring tick schedule.
pub trait TickSource {
    /// Begin firing every `interval`. `interval` is non-zero.
    fn start(&mut self, interval: Duration) -> Result<(), TimerError>;

    /// Cancel the schedule. No-op when already stopped.
    fn stop(&mut self);

    /// Whether a schedule is active.
    fn is_running(&self) -> bool;

    /// Number of ticks that became due.
    ///
    /// `elapsed` is the host-reported time since the previous call.
    /// Real-time sources ignore it and report what they observed.
    fn take_due(&mut self, elapsed: Duration) -> u32;
}

/// Which [`TickSource`] a timer is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerBackend {
    /// [`ElapsedClock`]: time is supplied by the host.
    #[default]
    Elapsed,
    /// [`ThreadTicker`]: time is measured by a background thread.
    Thread,
}

// ---------------------------------------------------------------------------
// ElapsedClock
// ---------------------------------------------------------------------------

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Deterministic tick source driven by reported elapsed time.
#[derive(Debug, Clone, Default)]
pub struct ElapsedClock {
    interval: Option<Duration>,
    accumulated: Duration,
}

impl ElapsedClock {
    /// Create a stopped clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated toward the next tick.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulated
    }
}

impl TickSource for ElapsedClock {
    fn start(&mut self, interval: Duration) -> Result<(), TimerError> {
        self.interval = Some(interval);
        self.accumulated = Duration::ZERO;
        Ok(())
    }

    fn stop(&mut self) {
        self.interval = None;
        self.accumulated = Duration::ZERO;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    fn take_due(&mut self, elapsed: Duration) -> u32 {
        let Some(interval) = self.interval else {
            return 0;
        };
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let due = self.accumulated.as_nanos() / interval.as_nanos();
        if due == 0 {
            return 0;
        }
        // The remainder is below `interval`, so its seconds fit in a u64.
        let rest = self.accumulated.as_nanos() - interval.as_nanos() * due;
        self.accumulated = Duration::new(
            (rest / NANOS_PER_SEC) as u64,
            (rest % NANOS_PER_SEC) as u32,
        );
        u32::try_from(due).unwrap_or(u32::MAX)
    }
}

// ---------------------------------------------------------------------------
// AutoplayTimer
// ---------------------------------------------------------------------------

/// A cancellable repeating timer with at most one active schedule.
pub struct AutoplayTimer {
    source: Box<dyn TickSource>,
    interval: Option<Duration>,
}

impl fmt::Debug for AutoplayTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoplayTimer")
            .field("interval", &self.interval)
            .field("running", &self.source.is_running())
            .finish_non_exhaustive()
    }
}

impl AutoplayTimer {
    /// Create a stopped timer on the given backend.
    #[must_use]
    pub fn new(backend: TimerBackend) -> Self {
        match backend {
            TimerBackend::Elapsed => Self::with_source(Box::new(ElapsedClock::new())),
            TimerBackend::Thread => Self::with_source(Box::new(ThreadTicker::new())),
        }
    }

    /// Create a stopped timer on a custom tick source.
    #[must_use]
    pub fn with_source(source: Box<dyn TickSource>) -> Self {
        Self {
            source,
            interval: None,
        }
    }

    /// Start (or restart) the schedule.
    pub fn start(&mut self, interval: Duration) -> Result<(), TimerError> {
        if interval.is_zero() {
            return Err(TimerError::ZeroInterval);
        }
        self.stop();
        self.source.start(interval)?;
        self.interval = Some(interval);
        tracing::debug!(interval_ms = interval.as_millis() as u64, "autoplay timer started");
        Ok(())
    }

    /// Cancel the schedule. Safe to call when stopped.
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            tracing::debug!("autoplay timer stopped");
        }
        self.source.stop();
    }

    /// Whether a schedule is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Active interval, if running.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Number of ticks that became due since the last call.
    pub fn due(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_none() {
            return 0;
        }
        self.source.take_due(elapsed)
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

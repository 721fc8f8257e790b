#![forbid(unsafe_code)]

//! Real-time tick source backed by a background thread.
//!
//! The thread waits on a [`StopSignal`] with a timeout of one interval; each
//! timeout posts a tick to a channel that the owning controller drains on its
//! own thread. No controller state crosses the thread boundary: the ticker
//! only reports *that* time passed.
//!
//! # Cancellation
//!
//! [`ThreadTicker::stop`] triggers the stop signal, joins the thread, and
//! drops the receiving end of the channel. When it returns, the thread has
//! exited and any tick it posted but nobody drained is gone, so a stopped
//! ticker can never advance a carousel. Dropping the ticker does the same.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use web_time::Duration;

use crate::autoplay::TickSource;
use crate::error::TimerError;

/// Signal for stopping a ticker thread.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been triggered.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if timed out.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let (stopped, _) = cvar
            .wait_timeout_while(guard, duration, |stopped| !*stopped)
            .unwrap_or_else(|e| e.into_inner());
        *stopped
    }
}

/// Trigger to stop a ticker from the owning side.
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    /// Signal the ticker thread to stop.
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        cvar.notify_all();
    }
}

struct RunningTicker {
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
    ticks: mpsc::Receiver<()>,
}

impl RunningTicker {
    /// Stop the thread, join it, and drop undelivered ticks.
    fn shutdown(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// [`TickSource`] that measures intervals on a background thread.
#[derive(Default)]
pub struct ThreadTicker {
    running: Option<RunningTicker>,
}

impl std::fmt::Debug for ThreadTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadTicker")
            .field("running", &self.running.is_some())
            .finish()
    }
}

impl ThreadTicker {
    /// Create a stopped ticker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for ThreadTicker {
    fn start(&mut self, interval: Duration) -> Result<(), TimerError> {
        self.stop();

        let (signal, trigger) = StopSignal::new();
        let (sender, ticks) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("vitrine-autoplay".into())
            .spawn(move || {
                loop {
                    if signal.wait_timeout(interval) {
                        break;
                    }
                    if sender.send(()).is_err() {
                        break;
                    }
                }
            })
            .map_err(TimerError::Spawn)?;

        tracing::trace!(interval_ms = interval.as_millis() as u64, "ticker thread spawned");
        self.running = Some(RunningTicker {
            trigger,
            thread: Some(thread),
            ticks,
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.shutdown();
            tracing::trace!("ticker thread joined");
        }
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn take_due(&mut self, _elapsed: Duration) -> u32 {
        let Some(running) = &self.running else {
            return 0;
        };
        let count = running.ticks.try_iter().count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

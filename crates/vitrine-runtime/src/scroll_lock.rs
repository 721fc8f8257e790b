#![forbid(unsafe_code)]

//! Document scroll lock: the engine's only global side effect.
//!
//! The host implements [`ScrollLockPort`] (on the web: toggling
//! `overflow: hidden` on the document body). The engine never touches the
//! port directly; it holds a [`ScrollLockGuard`] for as long as a modal is
//! open, and the guard releases the lock when dropped. Every teardown path,
//! including unwinding, therefore releases the lock.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Host capability that engages and releases the page scroll lock.
///
/// Both calls must be idempotent: the engine may release a lock that was
/// never acquired (closing a modal that was never opened).
pub trait ScrollLockPort {
    /// Engage the scroll lock.
    fn acquire(&self);

    /// Release the scroll lock.
    fn release(&self);
}

/// RAII handle for an engaged scroll lock.
#[must_use = "dropping the guard releases the scroll lock"]
pub struct ScrollLockGuard {
    port: Rc<dyn ScrollLockPort>,
}

impl ScrollLockGuard {
    /// Engage the lock through `port`.
    pub fn acquire(port: Rc<dyn ScrollLockPort>) -> Self {
        port.acquire();
        tracing::debug!("scroll lock engaged");
        Self { port }
    }
}

impl fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard").finish_non_exhaustive()
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.port.release();
        tracing::debug!("scroll lock released");
    }
}

/// Port that does nothing, for hosts without a scrollable document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScrollLock;

impl ScrollLockPort for NoopScrollLock {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// Port that records the lock state and call counts.
///
/// Useful as a test double and as a state mirror for hosts that render the
/// lock themselves.
#[derive(Debug, Default)]
pub struct ScrollLockProbe {
    locked: Cell<bool>,
    acquires: Cell<u32>,
    releases: Cell<u32>,
}

impl ScrollLockProbe {
    /// Create an unlocked probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the lock is currently engaged.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    /// Number of `acquire` calls.
    #[must_use]
    pub fn acquires(&self) -> u32 {
        self.acquires.get()
    }

    /// Number of `release` calls.
    #[must_use]
    pub fn releases(&self) -> u32 {
        self.releases.get()
    }
}

impl ScrollLockPort for ScrollLockProbe {
    fn acquire(&self) {
        self.locked.set(true);
        self.acquires.set(self.acquires.get() + 1);
    }

    fn release(&self) {
        self.locked.set(false);
        self.releases.set(self.releases.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let probe = Rc::new(ScrollLockProbe::new());
        let guard = ScrollLockGuard::acquire(probe.clone());
        assert!(probe.is_locked());
        drop(guard);
        assert!(!probe.is_locked());
        assert_eq!((probe.acquires(), probe.releases()), (1, 1));
    }

    #[test]
    fn guard_releases_during_unwind() {
        let probe = Rc::new(ScrollLockProbe::new());
        let port: Rc<dyn ScrollLockPort> = probe.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = ScrollLockGuard::acquire(port);
            panic!("teardown interrupted");
        }));
        assert!(result.is_err());
        assert!(!probe.is_locked());
    }

    #[test]
    fn noop_port_is_inert() {
        let _guard = ScrollLockGuard::acquire(Rc::new(NoopScrollLock));
    }
}

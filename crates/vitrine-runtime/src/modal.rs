#![forbid(unsafe_code)]

//! Modal detail sessions with a nested gallery carousel.
//!
//! [`ModalSessionManager`] owns which detail record is open. Opening a
//! record builds a fresh gallery [`CarouselController`] at index 0 and
//! engages the scroll lock; closing drops the controller and releases the
//! lock.
//!
//! # State Machine
//!
//! ```text
//!            open(r)                 open(r2)
//!   Closed ─────────▶ Open(r) ──────────────▶ Open(r2)
//!     ▲                  │
//!     └──── close() ─────┘
//! ```
//!
//! # Invariants
//!
//! 1. A gallery controller exists iff a record is open.
//! 2. Every `open` builds a new controller at index 0; nothing carries over
//!    from the previous record, or from a previous session of the same one.
//! 3. Re-opening while open keeps the scroll lock engaged throughout.
//! 4. Galleries are built without autoplay, whatever options were supplied.
//! 5. `close()` always ends with the lock released, even when nothing was
//!    open. Dropping an open manager is an implicit `close()`.

use std::fmt;
use std::rc::Rc;

use vitrine_core::{AutoplayPolicy, NavEvent, NavKey, NavigationError, Sequence};

use crate::controller::{CarouselController, CarouselOptions};
use crate::error::TimerError;
use crate::scroll_lock::{ScrollLockGuard, ScrollLockPort};

/// A detail record: an identifier plus its gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord<I, T> {
    pub id: I,
    pub gallery: Sequence<T>,
}

impl<I, T> DetailRecord<I, T> {
    /// Create a record.
    pub fn new(id: I, gallery: Sequence<T>) -> Self {
        Self { id, gallery }
    }
}

/// Outcome of routing an event to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Nothing happened (no modal open, or the event was not handled).
    Ignored,
    /// The gallery index was (re)set.
    Navigated,
    /// The event was consumed by a gesture in progress.
    Tracking,
    /// Escape closed the modal.
    Closed,
}

struct ModalSession<I, T> {
    record_id: I,
    gallery: CarouselController<T>,
    lock: ScrollLockGuard,
}

/// Owner of the open detail record and its gallery carousel.
pub struct ModalSessionManager<I, T> {
    port: Rc<dyn ScrollLockPort>,
    options: CarouselOptions,
    session: Option<ModalSession<I, T>>,
}

impl<I: fmt::Debug, T> fmt::Debug for ModalSessionManager<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ModalSessionManager");
        match &self.session {
            Some(session) => s
                .field("open_record_id", &session.record_id)
                .field("gallery", &session.gallery),
            None => s.field("open_record_id", &Option::<&I>::None),
        };
        s.finish_non_exhaustive()
    }
}

impl<I, T> ModalSessionManager<I, T> {
    /// Create a closed manager with gallery defaults (no autoplay).
    pub fn new(port: Rc<dyn ScrollLockPort>) -> Self {
        Self::with_options(port, CarouselOptions::gallery())
    }

    /// Create a closed manager whose galleries use `options`.
    ///
    /// Galleries never autoplay: the autoplay policy in `options` is
    /// replaced with [`AutoplayPolicy::Disabled`].
    pub fn with_options(port: Rc<dyn ScrollLockPort>, options: CarouselOptions) -> Self {
        Self {
            port,
            options: options.autoplay(AutoplayPolicy::Disabled),
            session: None,
        }
    }

    /// Whether a record is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Identifier of the open record.
    #[must_use]
    pub fn open_record_id(&self) -> Option<&I> {
        self.session.as_ref().map(|s| &s.record_id)
    }

    /// Gallery controller of the open record.
    #[must_use]
    pub fn gallery(&self) -> Option<&CarouselController<T>> {
        self.session.as_ref().map(|s| &s.gallery)
    }

    /// Mutable gallery controller of the open record.
    pub fn gallery_mut(&mut self) -> Option<&mut CarouselController<T>> {
        self.session.as_mut().map(|s| &mut s.gallery)
    }

    /// Gallery index, when open.
    #[must_use]
    pub fn nested_current_index(&self) -> Option<usize> {
        self.gallery().map(CarouselController::current_index)
    }

    /// Gallery item, when open.
    #[must_use]
    pub fn nested_current_item(&self) -> Option<&T> {
        self.gallery().map(CarouselController::current)
    }

    /// Open `record`, replacing any open one.
    ///
    /// On error the manager is left exactly as it was.
    pub fn open(&mut self, record: &DetailRecord<I, T>) -> Result<(), TimerError>
    where
        I: Clone + fmt::Debug,
    {
        let gallery = CarouselController::new(record.gallery.clone(), self.options)?;
        let lock = match self.session.take() {
            Some(previous) => {
                tracing::debug!(
                    from = ?previous.record_id,
                    to = ?record.id,
                    "modal switched records"
                );
                previous.lock
            }
            None => ScrollLockGuard::acquire(Rc::clone(&self.port)),
        };
        tracing::debug!(record = ?record.id, len = gallery.len(), "modal opened");
        self.session = Some(ModalSession {
            record_id: record.id.clone(),
            gallery,
            lock,
        });
        Ok(())
    }

    /// Close the modal and release the scroll lock.
    ///
    /// Returns the identifier of the record that was open.
    pub fn close(&mut self) -> Option<I> {
        match self.session.take() {
            Some(ModalSession {
                record_id,
                gallery,
                lock,
            }) => {
                drop(gallery);
                drop(lock);
                tracing::debug!("modal closed");
                Some(record_id)
            }
            None => {
                self.port.release();
                None
            }
        }
    }

    /// Route an event: Escape closes, everything else goes to the gallery.
    pub fn handle_event(&mut self, event: &NavEvent) -> Result<ModalAction, NavigationError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(ModalAction::Ignored);
        };
        if matches!(event, NavEvent::Key(NavKey::Escape)) {
            self.close();
            return Ok(ModalAction::Closed);
        }
        let action = if session.gallery.handle_event(event)? {
            ModalAction::Navigated
        } else if event.is_pointer() {
            ModalAction::Tracking
        } else {
            ModalAction::Ignored
        };
        Ok(action)
    }
}

impl<I, T> Drop for ModalSessionManager<I, T> {
    fn drop(&mut self) {
        if self.is_open() {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_lock::ScrollLockProbe;

    fn record(id: u32, n: usize) -> DetailRecord<u32, String> {
        let gallery = (0..n).map(|i| format!("{id}-{i}.jpg")).collect::<Vec<_>>();
        DetailRecord::new(id, Sequence::new(gallery).unwrap())
    }

    fn manager() -> (Rc<ScrollLockProbe>, ModalSessionManager<u32, String>) {
        let probe = Rc::new(ScrollLockProbe::new());
        let manager = ModalSessionManager::new(probe.clone());
        (probe, manager)
    }

    #[test]
    fn starts_closed() {
        let (probe, m) = manager();
        assert!(!m.is_open());
        assert_eq!(m.open_record_id(), None);
        assert!(m.gallery().is_none());
        assert!(!probe.is_locked());
    }

    #[test]
    fn open_builds_gallery_and_locks() {
        let (probe, mut m) = manager();
        m.open(&record(7, 5)).unwrap();
        assert_eq!(m.open_record_id(), Some(&7));
        assert_eq!(m.nested_current_index(), Some(0));
        assert_eq!(m.nested_current_item().map(String::as_str), Some("7-0.jpg"));
        assert!(!m.gallery().unwrap().autoplay_enabled());
        assert!(probe.is_locked());
    }

    #[test]
    fn close_drops_gallery_and_unlocks() {
        let (probe, mut m) = manager();
        m.open(&record(1, 3)).unwrap();
        assert_eq!(m.close(), Some(1));
        assert!(m.gallery().is_none());
        assert!(!probe.is_locked());
    }

    #[test]
    fn close_without_open_still_releases() {
        let (probe, mut m) = manager();
        assert_eq!(m.close(), None);
        assert_eq!(probe.releases(), 1);
        assert!(!probe.is_locked());
    }

    #[test]
    fn reopen_same_record_resets_index() {
        let (_probe, mut m) = manager();
        let r = record(3, 5);
        m.open(&r).unwrap();
        m.gallery_mut().unwrap().go_to(4).unwrap();
        m.close();
        m.open(&r).unwrap();
        assert_eq!(m.nested_current_index(), Some(0));
    }

    #[test]
    fn switching_records_keeps_lock_and_resets_index() {
        let (probe, mut m) = manager();
        m.open(&record(1, 5)).unwrap();
        m.gallery_mut().unwrap().next();
        m.open(&record(2, 4)).unwrap();

        assert_eq!(m.open_record_id(), Some(&2));
        assert_eq!(m.nested_current_index(), Some(0));
        assert_eq!(m.gallery().unwrap().len(), 4);
        assert!(probe.is_locked());
        assert_eq!(probe.acquires(), 1);
        assert_eq!(probe.releases(), 0);
    }

    #[test]
    fn drop_while_open_releases() {
        let (probe, mut m) = manager();
        m.open(&record(1, 2)).unwrap();
        drop(m);
        assert!(!probe.is_locked());
    }

    #[test]
    fn drop_after_close_does_not_release_again() {
        let (probe, mut m) = manager();
        m.open(&record(1, 2)).unwrap();
        m.close();
        drop(m);
        assert_eq!((probe.acquires(), probe.releases()), (1, 1));
    }

    #[test]
    fn escape_closes() {
        let (probe, mut m) = manager();
        m.open(&record(1, 2)).unwrap();
        assert_eq!(
            m.handle_event(&NavEvent::Key(NavKey::Escape)),
            Ok(ModalAction::Closed)
        );
        assert!(!m.is_open());
        assert!(!probe.is_locked());
    }

    #[test]
    fn events_reach_gallery() {
        let (_probe, mut m) = manager();
        assert_eq!(m.handle_event(&NavEvent::Next), Ok(ModalAction::Ignored));

        m.open(&record(1, 3)).unwrap();
        assert_eq!(m.handle_event(&NavEvent::Next), Ok(ModalAction::Navigated));
        assert_eq!(
            m.handle_event(&NavEvent::PointerDown { x: 10.0 }),
            Ok(ModalAction::Tracking)
        );
        assert_eq!(
            m.handle_event(&NavEvent::GoTo(3)),
            Err(NavigationError::InvalidIndex { index: 3, len: 3 })
        );
        assert_eq!(m.nested_current_index(), Some(1));
    }

    #[test]
    fn gallery_options_cannot_enable_autoplay() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut m: ModalSessionManager<u32, String> =
            ModalSessionManager::with_options(probe.clone(), CarouselOptions::primary());
        m.open(&record(1, 3)).unwrap();

        let gallery = m.gallery_mut().unwrap();
        assert!(!gallery.autoplay_enabled());
        assert!(!gallery.autoplay_running());
        assert_eq!(gallery.tick(web_time::Duration::from_millis(5001)), 0);
        assert_eq!(m.nested_current_index(), Some(0));
    }
}

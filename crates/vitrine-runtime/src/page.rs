#![forbid(unsafe_code)]

//! Page-level composition: the hero carousel plus the detail modal.
//!
//! A [`ShowcasePage`] is what the presentation layer binds to. It owns the
//! static content supplied at mount (hero images and detail records), the
//! page [`CarouselController`], and the [`ModalSessionManager`]. Input
//! arrives as [`PageEvent`]s; the render contract leaves as a [`PageView`].
//!
//! # Key routing
//!
//! While a modal is open, arrow keys drive the gallery and Escape closes the
//! modal. Otherwise arrow keys drive the page carousel and Escape is ignored.
//!
//! # Teardown
//!
//! Dropping the page is an unmount: the page carousel's timer is cancelled
//! and an open modal is closed, releasing the scroll lock.

use std::fmt;
use std::rc::Rc;

use vitrine_core::{EngineConfig, NavEvent, NavKey, NavigationError, Sequence};
use web_time::{Duration, Instant};

use crate::autoplay::TimerBackend;
use crate::controller::{CarouselController, CarouselOptions, CarouselSnapshot};
use crate::error::EngineError;
use crate::modal::{DetailRecord, ModalAction, ModalSessionManager};
use crate::scroll_lock::ScrollLockPort;

/// Input for a [`ShowcasePage`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Event aimed at the page carousel.
    Carousel(NavEvent),
    /// Event aimed at the open modal's gallery.
    Gallery(NavEvent),
    /// Open the detail record at this position in the record list.
    OpenRecord(usize),
    /// Close the modal (close button, backdrop click).
    CloseModal,
    /// Key press, routed by modal state.
    Key(NavKey),
}

/// Render contract for the open modal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalView<'a, I, G> {
    pub record_id: &'a I,
    pub nested_current_index: usize,
    pub nested_current_item: &'a G,
    pub nested_len: usize,
}

/// Render contract for the whole page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageView<'a, T, I, G> {
    pub current_index: usize,
    pub current_item: &'a T,
    pub carousel: CarouselSnapshot,
    pub modal: Option<ModalView<'a, I, G>>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`ShowcasePage`].
pub struct ShowcasePageBuilder<T, I, G> {
    images: Sequence<T>,
    records: Vec<DetailRecord<I, G>>,
    scroll_lock: Rc<dyn ScrollLockPort>,
    config: EngineConfig,
    backend: TimerBackend,
}

impl<T, I, G> ShowcasePageBuilder<T, I, G> {
    /// Detail records the modal can open.
    #[must_use]
    pub fn records(mut self, records: Vec<DetailRecord<I, G>>) -> Self {
        self.records = records;
        self
    }

    /// Engine configuration (defaults to [`EngineConfig::default`]).
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Timer backend for autoplay.
    #[must_use]
    pub fn timer_backend(mut self, backend: TimerBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Mount the page: build the page carousel and start its autoplay.
    pub fn build(self) -> Result<ShowcasePage<T, I, G>, EngineError> {
        let swipe = self.config.swipe_config();
        let primary_options = CarouselOptions::primary()
            .autoplay(self.config.primary_policy())
            .swipe(swipe)
            .backend(self.backend);
        let gallery_options = CarouselOptions::gallery()
            .swipe(swipe)
            .backend(self.backend);

        let primary = CarouselController::new(self.images, primary_options)?;
        tracing::debug!(records = self.records.len(), "showcase page mounted");
        Ok(ShowcasePage {
            primary,
            modal: ModalSessionManager::with_options(self.scroll_lock, gallery_options),
            records: self.records,
            last_frame: None,
        })
    }
}

// ---------------------------------------------------------------------------
// ShowcasePage
// ---------------------------------------------------------------------------

/// The hero carousel and the detail modal of one page.
pub struct ShowcasePage<T, I, G> {
    primary: CarouselController<T>,
    modal: ModalSessionManager<I, G>,
    records: Vec<DetailRecord<I, G>>,
    last_frame: Option<Instant>,
}

impl<T, I: fmt::Debug, G> fmt::Debug for ShowcasePage<T, I, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowcasePage")
            .field("primary", &self.primary)
            .field("modal", &self.modal)
            .field("records", &self.records.len())
            .finish()
    }
}

impl<T, I, G> ShowcasePage<T, I, G>
where
    I: Clone + fmt::Debug,
{
    /// Start building a page over `images`.
    pub fn builder(
        images: Sequence<T>,
        scroll_lock: Rc<dyn ScrollLockPort>,
    ) -> ShowcasePageBuilder<T, I, G> {
        ShowcasePageBuilder {
            images,
            records: Vec::new(),
            scroll_lock,
            config: EngineConfig::default(),
            backend: TimerBackend::default(),
        }
    }

    /// Page carousel.
    #[must_use]
    pub fn primary(&self) -> &CarouselController<T> {
        &self.primary
    }

    /// Mutable page carousel (for registering observers).
    pub fn primary_mut(&mut self) -> &mut CarouselController<T> {
        &mut self.primary
    }

    /// Modal session.
    #[must_use]
    pub fn modal(&self) -> &ModalSessionManager<I, G> {
        &self.modal
    }

    /// Mutable modal session.
    pub fn modal_mut(&mut self) -> &mut ModalSessionManager<I, G> {
        &mut self.modal
    }

    /// Detail records supplied at mount.
    #[must_use]
    pub fn records(&self) -> &[DetailRecord<I, G>] {
        &self.records
    }

    /// Open the record at `position`.
    pub fn open_record(&mut self, position: usize) -> Result<(), EngineError> {
        let record = self
            .records
            .get(position)
            .ok_or(NavigationError::InvalidIndex {
                index: position,
                len: self.records.len(),
            })?;
        self.modal.open(record)?;
        Ok(())
    }

    /// Close the modal. Releases the scroll lock even if nothing was open.
    pub fn close_modal(&mut self) -> Option<I> {
        self.modal.close()
    }

    /// Route one input event.
    ///
    /// Returns `Ok(true)` if any index, or the open record, changed.
    pub fn handle(&mut self, event: PageEvent) -> Result<bool, EngineError> {
        let changed = match event {
            PageEvent::Carousel(nav) => self.primary.handle_event(&nav)?,
            PageEvent::Gallery(nav) => {
                matches!(
                    self.modal.handle_event(&nav)?,
                    ModalAction::Navigated | ModalAction::Closed
                )
            }
            PageEvent::OpenRecord(position) => {
                self.open_record(position)?;
                true
            }
            PageEvent::CloseModal => self.close_modal().is_some(),
            PageEvent::Key(key) => {
                if self.modal.is_open() {
                    matches!(
                        self.modal.handle_event(&NavEvent::Key(key))?,
                        ModalAction::Navigated | ModalAction::Closed
                    )
                } else {
                    self.primary.handle_event(&NavEvent::Key(key))?
                }
            }
        };
        Ok(changed)
    }

    /// Feed elapsed time to every carousel's autoplay.
    ///
    /// Returns the number of items advanced.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        let mut advanced = self.primary.tick(elapsed);
        if let Some(gallery) = self.modal.gallery_mut() {
            advanced += gallery.tick(elapsed);
        }
        advanced
    }

    /// Frame-clock variant of [`tick`](Self::tick): elapsed time is measured
    /// from the previous call. The first call only records `now`.
    pub fn tick_at(&mut self, now: Instant) -> u32 {
        let elapsed = match self.last_frame.replace(now) {
            Some(last) => now.duration_since(last),
            None => Duration::ZERO,
        };
        self.tick(elapsed)
    }

    /// Render contract for the presentation layer.
    #[must_use]
    pub fn view(&self) -> PageView<'_, T, I, G> {
        let modal = self.modal.open_record_id().zip(self.modal.gallery()).map(
            |(record_id, gallery)| ModalView {
                record_id,
                nested_current_index: gallery.current_index(),
                nested_current_item: gallery.current(),
                nested_len: gallery.len(),
            },
        );
        PageView {
            current_index: self.primary.current_index(),
            current_item: self.primary.current(),
            carousel: self.primary.snapshot(),
            modal,
        }
    }
}

impl<T, I, G> ShowcasePage<T, I, G> {
    /// Tear the page down: unmount the page carousel, then close the modal
    /// and release the scroll lock. Idempotent.
    pub fn unmount(&mut self) {
        self.primary.unmount();
        self.modal.close();
        self.last_frame = None;
        tracing::debug!("showcase page unmounted");
    }
}

impl<T, I, G> Drop for ShowcasePage<T, I, G> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_lock::ScrollLockProbe;

    type Page = ShowcasePage<&'static str, &'static str, u8>;

    fn page(probe: &Rc<ScrollLockProbe>) -> Page {
        let images = Sequence::new(vec!["a.jpg", "b.jpg", "c.jpg"]).unwrap();
        let records = vec![
            DetailRecord::new("acme", Sequence::new(vec![10, 11, 12, 13, 14]).unwrap()),
            DetailRecord::new("globex", Sequence::new(vec![20, 21]).unwrap()),
        ];
        ShowcasePage::builder(images, probe.clone())
            .records(records)
            .build()
            .unwrap()
    }

    #[test]
    fn view_without_modal() {
        let probe = Rc::new(ScrollLockProbe::new());
        let p = page(&probe);
        let view = p.view();
        assert_eq!(view.current_index, 0);
        assert_eq!(*view.current_item, "a.jpg");
        assert!(view.carousel.autoplay_enabled);
        assert!(view.modal.is_none());
    }

    #[test]
    fn open_record_exposes_nested_view() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        assert!(p.handle(PageEvent::OpenRecord(0)).unwrap());
        p.handle(PageEvent::Gallery(NavEvent::Next)).unwrap();

        let modal = p.view().modal.unwrap();
        assert_eq!(*modal.record_id, "acme");
        assert_eq!(modal.nested_current_index, 1);
        assert_eq!(*modal.nested_current_item, 11);
        assert_eq!(modal.nested_len, 5);
        assert!(probe.is_locked());
    }

    #[test]
    fn unknown_record_is_invalid_index() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        let err = p.handle(PageEvent::OpenRecord(2)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Navigation(NavigationError::InvalidIndex { index: 2, len: 2 })
        ));
        assert!(!p.modal().is_open());
        assert!(!probe.is_locked());
    }

    #[test]
    fn keys_follow_modal_state() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);

        p.handle(PageEvent::Key(NavKey::Right)).unwrap();
        assert_eq!(p.view().current_index, 1);
        assert!(!p.handle(PageEvent::Key(NavKey::Escape)).unwrap());

        p.handle(PageEvent::OpenRecord(1)).unwrap();
        p.handle(PageEvent::Key(NavKey::Left)).unwrap();
        assert_eq!(p.view().current_index, 1);
        assert_eq!(p.modal().nested_current_index(), Some(1));

        assert!(p.handle(PageEvent::Key(NavKey::Escape)).unwrap());
        assert!(!p.modal().is_open());
        assert!(!probe.is_locked());
    }

    #[test]
    fn primary_keeps_rotating_while_modal_open() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        p.handle(PageEvent::OpenRecord(0)).unwrap();
        assert_eq!(p.tick(Duration::from_millis(5000)), 1);
        assert_eq!(p.view().current_index, 1);
        assert_eq!(p.modal().nested_current_index(), Some(0));
    }

    #[test]
    fn tick_at_measures_between_frames() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        let t0 = Instant::now();
        assert_eq!(p.tick_at(t0), 0);
        assert_eq!(p.tick_at(t0 + Duration::from_millis(4000)), 0);
        assert_eq!(p.tick_at(t0 + Duration::from_millis(5001)), 1);
        assert_eq!(p.view().current_index, 1);
    }

    #[test]
    fn close_modal_event_releases_lock() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        assert!(!p.handle(PageEvent::CloseModal).unwrap());
        p.handle(PageEvent::OpenRecord(0)).unwrap();
        assert!(p.handle(PageEvent::CloseModal).unwrap());
        assert!(!probe.is_locked());
    }

    #[test]
    fn unmount_while_open_releases_lock() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        p.handle(PageEvent::OpenRecord(1)).unwrap();
        drop(p);
        assert!(!probe.is_locked());
    }

    #[test]
    fn explicit_unmount_stops_everything() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut p = page(&probe);
        p.handle(PageEvent::OpenRecord(0)).unwrap();
        p.unmount();

        assert!(!probe.is_locked());
        assert!(!p.modal().is_open());
        assert!(!p.view().carousel.autoplay_enabled);
        assert!(!p.primary().autoplay_running());
        assert_eq!(p.tick(Duration::from_secs(60)), 0);
        assert_eq!(p.view().current_index, 0);

        assert_eq!((probe.acquires(), probe.releases()), (1, 1));

        drop(p);
        assert!(!probe.is_locked());
        assert_eq!(probe.acquires(), 1);
    }

    #[test]
    fn gallery_never_autoplays_even_with_custom_config() {
        let probe = Rc::new(ScrollLockProbe::new());
        let mut config = EngineConfig::default();
        config.primary.interval_ms = 1000;
        let images = Sequence::new(vec!["a.jpg", "b.jpg"]).unwrap();
        let mut p: Page = ShowcasePage::builder(images, probe.clone())
            .records(vec![DetailRecord::new(
                "acme",
                Sequence::new(vec![1, 2, 3]).unwrap(),
            )])
            .config(config)
            .build()
            .unwrap();

        p.handle(PageEvent::OpenRecord(0)).unwrap();
        p.tick(Duration::from_millis(5001));
        assert_eq!(p.modal().nested_current_index(), Some(0));
        assert!(!p.modal().gallery().unwrap().autoplay_enabled());
    }
}

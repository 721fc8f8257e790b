//! End-to-end navigation scenarios for the page carousel and the modal
//! gallery, driven through the public API with a deterministic clock.

use std::rc::Rc;

use vitrine_runtime::{
    CarouselController, CarouselOptions, DetailRecord, ModalSessionManager, NavEvent,
    NavigationError, PageEvent, ScrollLockProbe, Sequence, ShowcasePage, SwipeIntent,
    SwipeTracker,
};
use web_time::Duration;

const MS_5000: Duration = Duration::from_millis(5000);

fn hero_images() -> Sequence<&'static str> {
    Sequence::new(vec![
        "hero-1.jpg",
        "hero-2.jpg",
        "hero-3.jpg",
        "hero-4.jpg",
        "hero-5.jpg",
    ])
    .unwrap()
}

fn partner(id: &'static str, entries: usize) -> DetailRecord<&'static str, String> {
    let gallery = (0..entries).map(|i| format!("{id}/{i}.jpg")).collect::<Vec<_>>();
    DetailRecord::new(id, Sequence::new(gallery).unwrap())
}

#[test]
fn autoplay_then_previous_silences_rotation() {
    let mut carousel = CarouselController::new(hero_images(), CarouselOptions::primary()).unwrap();

    carousel.tick(Duration::from_millis(5001));
    assert_eq!(carousel.current_index(), 1);
    assert_eq!(*carousel.current(), "hero-2.jpg");

    carousel.previous();
    assert_eq!(carousel.current_index(), 0);

    for _ in 0..10 {
        carousel.tick(MS_5000);
    }
    assert_eq!(carousel.current_index(), 0, "autoplay must stay silent");
}

#[test]
fn swipe_thresholds() {
    let mut tracker = SwipeTracker::default();

    tracker.on_start(100.0);
    tracker.on_move(40.0);
    assert_eq!(tracker.on_end(), SwipeIntent::Next);
    assert_eq!(tracker.on_end(), SwipeIntent::None);

    tracker.on_start(100.0);
    tracker.on_move(120.0);
    assert_eq!(tracker.on_end(), SwipeIntent::None);
    assert_eq!(tracker.on_end(), SwipeIntent::None);
}

#[test]
fn swipe_through_events_on_the_page() {
    let probe = Rc::new(ScrollLockProbe::new());
    let mut page: ShowcasePage<_, &'static str, String> =
        ShowcasePage::builder(hero_images(), probe).build().unwrap();

    for event in [
        NavEvent::PointerDown { x: 100.0 },
        NavEvent::PointerMove { x: 70.0 },
        NavEvent::PointerMove { x: 30.0 },
    ] {
        assert!(!page.handle(PageEvent::Carousel(event)).unwrap());
    }
    assert!(page.handle(PageEvent::Carousel(NavEvent::PointerUp)).unwrap());
    assert_eq!(page.view().current_index, 1);
    assert!(!page.view().carousel.autoplay_enabled);
}

#[test]
fn out_of_range_go_to_is_rejected() {
    let mut carousel = CarouselController::new(hero_images(), CarouselOptions::primary()).unwrap();
    carousel.go_to(2).unwrap();
    assert_eq!(
        carousel.go_to(5),
        Err(NavigationError::InvalidIndex { index: 5, len: 5 })
    );
    assert_eq!(carousel.current_index(), 2);
}

#[test]
fn gallery_always_opens_at_zero() {
    let probe = Rc::new(ScrollLockProbe::new());
    let mut modal = ModalSessionManager::new(probe.clone());
    let acme = partner("acme", 5);

    modal.open(&acme).unwrap();
    modal.gallery_mut().unwrap().go_to(3).unwrap();
    assert_eq!(modal.nested_current_index(), Some(3));

    modal.close();
    assert!(!probe.is_locked());

    modal.open(&acme).unwrap();
    assert_eq!(modal.nested_current_index(), Some(0));
    assert!(probe.is_locked());

    modal.gallery_mut().unwrap().previous();
    assert_eq!(modal.nested_current_index(), Some(4));

    modal.open(&partner("globex", 5)).unwrap();
    assert_eq!(modal.nested_current_index(), Some(0));
}

#[test]
fn gallery_never_autoplays() {
    let probe = Rc::new(ScrollLockProbe::new());
    let mut page = ShowcasePage::builder(hero_images(), probe)
        .records(vec![partner("acme", 5)])
        .build()
        .unwrap();

    page.handle(PageEvent::OpenRecord(0)).unwrap();
    page.tick(Duration::from_secs(60));

    let view = page.view();
    assert_eq!(view.modal.unwrap().nested_current_index, 0);
    assert_eq!(view.current_index, 2, "page carousel keeps its own schedule");
}

#[test]
fn modal_lifecycle_balances_scroll_lock() {
    let probe = Rc::new(ScrollLockProbe::new());
    {
        let mut page = ShowcasePage::builder(hero_images(), probe.clone())
            .records(vec![partner("acme", 3), partner("globex", 2)])
            .build()
            .unwrap();

        page.handle(PageEvent::OpenRecord(0)).unwrap();
        page.handle(PageEvent::OpenRecord(1)).unwrap();
        assert!(probe.is_locked());
        assert_eq!(probe.acquires(), 1);
    }
    assert!(!probe.is_locked(), "unmount must release the lock");
    assert_eq!(probe.releases(), 1);
}

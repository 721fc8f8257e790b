#![no_main]

use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vitrine_core::{NavEvent, NavKey, Sequence};
use vitrine_runtime::{DetailRecord, PageEvent, ScrollLockProbe, ShowcasePage};
use web_time::Duration;

#[derive(Debug, Arbitrary)]
enum FuzzKey {
    Left,
    Right,
    Escape,
}

#[derive(Debug, Arbitrary)]
enum FuzzNav {
    Down(f32),
    Move(f32),
    Up,
    Cancel,
    Next,
    Previous,
    GoTo(u8),
    Key(FuzzKey),
}

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Carousel(FuzzNav),
    Gallery(FuzzNav),
    Open(u8),
    Close,
    Key(FuzzKey),
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    images: u8,
    galleries: Vec<u8>,
    ops: Vec<FuzzOp>,
}

fn key(k: FuzzKey) -> NavKey {
    match k {
        FuzzKey::Left => NavKey::Left,
        FuzzKey::Right => NavKey::Right,
        FuzzKey::Escape => NavKey::Escape,
    }
}

fn nav(n: FuzzNav) -> NavEvent {
    match n {
        FuzzNav::Down(x) => NavEvent::PointerDown { x },
        FuzzNav::Move(x) => NavEvent::PointerMove { x },
        FuzzNav::Up => NavEvent::PointerUp,
        FuzzNav::Cancel => NavEvent::PointerCancel,
        FuzzNav::Next => NavEvent::Next,
        FuzzNav::Previous => NavEvent::Previous,
        FuzzNav::GoTo(i) => NavEvent::GoTo(usize::from(i)),
        FuzzNav::Key(k) => NavEvent::Key(key(k)),
    }
}

fuzz_target!(|input: Input| {
    // Derive dataset sizes: 1..=16 images, up to 8 records of 1..=16 entries.
    let image_count = usize::from(input.images % 16) + 1;
    let images = Sequence::new((0..image_count).collect::<Vec<_>>()).unwrap();
    let records: Vec<_> = input
        .galleries
        .iter()
        .take(8)
        .enumerate()
        .map(|(id, &n)| {
            let n = usize::from(n % 16) + 1;
            DetailRecord::new(id, Sequence::new(vec![0u8; n]).unwrap())
        })
        .collect();
    let record_count = records.len();

    let probe = Rc::new(ScrollLockProbe::new());
    let mut page = ShowcasePage::builder(images, probe.clone())
        .records(records)
        .build()
        .unwrap();

    let mut manual = false;
    for op in input.ops.into_iter().take(512) {
        let before = page.view().current_index;
        match op {
            FuzzOp::Carousel(n) => {
                if matches!(page.handle(PageEvent::Carousel(nav(n))), Ok(true)) {
                    manual = true;
                }
            }
            FuzzOp::Gallery(n) => {
                let _ = page.handle(PageEvent::Gallery(nav(n)));
            }
            FuzzOp::Open(i) => {
                let _ = page.handle(PageEvent::OpenRecord(usize::from(i)));
            }
            FuzzOp::Close => {
                let _ = page.handle(PageEvent::CloseModal);
            }
            FuzzOp::Key(k) => {
                let open = page.modal().is_open();
                if matches!(page.handle(PageEvent::Key(key(k))), Ok(true)) && !open {
                    manual = true;
                }
            }
            FuzzOp::Tick(ms) => {
                page.tick(Duration::from_millis(u64::from(ms)));
                if manual {
                    assert_eq!(page.view().current_index, before, "silenced autoplay advanced");
                }
            }
        }

        // Post-conditions that must always hold:
        let view = page.view();
        assert!(view.current_index < image_count, "page index OOB");
        assert_eq!(*view.current_item, view.current_index);
        assert_eq!(view.carousel.autoplay_enabled, !manual);
        match view.modal {
            Some(modal) => {
                assert!(*modal.record_id < record_count);
                assert!(
                    modal.nested_current_index < modal.nested_len,
                    "gallery index OOB"
                );
                assert!(probe.is_locked(), "open modal without scroll lock");
            }
            None => assert!(!probe.is_locked(), "scroll lock leaked"),
        }
    }

    drop(page);
    assert!(!probe.is_locked(), "unmount leaked scroll lock");
});

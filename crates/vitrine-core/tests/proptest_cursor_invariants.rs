//! Property-based invariant tests for the index cursor and swipe tracker.
//!
//! ## Invariants
//!
//! 1. Bounds: any sequence of advances keeps `index < len`
//! 2. Inverse: forward then backward (and vice versa) is the identity
//! 3. Full cycle: `len` forward steps return to the start
//! 4. Rejected jumps leave the index unchanged
//! 5. Swipe resolution matches the sign and magnitude of travel
//! 6. The tracker is always empty after `on_end()`

use std::num::NonZeroUsize;

use proptest::prelude::*;
use vitrine_core::{Direction, IndexCursor, NavigationError, SwipeIntent, SwipeTracker};

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_len() -> impl Strategy<Value = NonZeroUsize> {
    (1usize..64).prop_map(|n| NonZeroUsize::new(n).unwrap())
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
}

fn arb_steps(max_n: usize) -> impl Strategy<Value = Vec<Direction>> {
    prop::collection::vec(arb_direction(), 0..max_n)
}

fn arb_coord() -> impl Strategy<Value = f32> {
    (-2000i32..2000).prop_map(|x| x as f32)
}

// ── 1. Bounds ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn advance_stays_in_bounds(len in arb_len(), steps in arb_steps(200)) {
        let mut cursor = IndexCursor::new(len);
        for step in steps {
            let index = cursor.advance(step);
            prop_assert!(index < len.get(), "index={index} len={len}");
            prop_assert_eq!(index, cursor.index());
        }
    }
}

// ── 2. Inverse ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn step_then_reverse_is_identity(
        len in arb_len(),
        warmup in arb_steps(50),
        direction in arb_direction(),
    ) {
        let mut cursor = IndexCursor::new(len);
        for step in warmup {
            cursor.advance(step);
        }
        let before = cursor.index();
        cursor.advance(direction);
        cursor.advance(direction.reverse());
        prop_assert_eq!(cursor.index(), before);
    }
}

// ── 3. Full cycle ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn len_steps_is_full_cycle(
        len in arb_len(),
        start in 0usize..64,
        direction in arb_direction(),
    ) {
        let mut cursor = IndexCursor::new(len);
        let start = start % len.get();
        cursor.jump_to(start).unwrap();
        for _ in 0..len.get() {
            cursor.advance(direction);
        }
        prop_assert_eq!(cursor.index(), start);
    }
}

// ── 4. Rejected jumps ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn out_of_range_jump_is_rejected(
        len in arb_len(),
        start in 0usize..64,
        overshoot in 0usize..1000,
    ) {
        let mut cursor = IndexCursor::new(len);
        let start = start % len.get();
        cursor.jump_to(start).unwrap();
        let target = len.get() + overshoot;
        prop_assert_eq!(
            cursor.jump_to(target),
            Err(NavigationError::InvalidIndex { index: target, len: len.get() })
        );
        prop_assert_eq!(cursor.index(), start);
    }
}

// ── 5/6. Swipe resolution ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn swipe_matches_travel(start in arb_coord(), current in arb_coord()) {
        let mut tracker = SwipeTracker::default();
        tracker.on_start(start);
        tracker.on_move(current);
        let intent = tracker.on_end();

        let distance = start - current;
        let expected = if distance > 50.0 {
            SwipeIntent::Next
        } else if distance < -50.0 {
            SwipeIntent::Previous
        } else {
            SwipeIntent::None
        };
        prop_assert_eq!(intent, expected);
        prop_assert!(tracker.sample().is_empty());
        prop_assert_eq!(tracker.on_end(), SwipeIntent::None);
    }
}

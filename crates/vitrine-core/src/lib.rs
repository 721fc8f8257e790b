#![forbid(unsafe_code)]

//! Core: index cursors, swipe recognition, and navigation events.
//!
//! # Role in Vitrine
//! `vitrine-core` is the pure state layer. It owns the bounded, wrapping
//! [`IndexCursor`], the immutable [`Sequence`] a carousel navigates, the
//! [`SwipeTracker`] that turns raw pointer coordinates into a
//! [`SwipeIntent`], and the normalized [`NavEvent`] input type.
//!
//! Nothing here knows about time or side effects. The runtime
//! (`vitrine-runtime`) composes these pieces with autoplay timers and the
//! modal scroll lock into carousel controllers.
//!
//! # Primary responsibilities
//! - **IndexCursor**: wrap-around `advance` and checked `jump_to`.
//! - **SwipeTracker**: threshold-based horizontal swipe detection.
//! - **EngineConfig**: autoplay interval and swipe threshold as data.
//! - **NavigationError**: the small error taxonomy shared by both crates.

pub mod config;
pub mod cursor;
pub mod error;
pub mod event;
pub mod gesture;
pub mod sequence;

pub use config::{
    AutoplayPolicy, CarouselPolicyConfig, ConfigError, DEFAULT_AUTOPLAY_INTERVAL,
    DEFAULT_SWIPE_THRESHOLD, EngineConfig, GesturePolicyConfig,
};
pub use cursor::{Direction, IndexCursor};
pub use error::NavigationError;
pub use event::{NavEvent, NavKey};
pub use gesture::{GestureSample, SwipeConfig, SwipeIntent, SwipeTracker};
pub use sequence::Sequence;

#![forbid(unsafe_code)]

//! Vitrine Runtime
//!
//! This crate ties the pure state of `vitrine-core` to time and to the one
//! side effect the engine has, the document scroll lock.
//!
//! # Key Components
//!
//! - [`AutoplayTimer`] - Cancellable repeating schedule over a [`TickSource`]
//! - [`ElapsedClock`] - Deterministic tick source fed with elapsed time
//! - [`ThreadTicker`] - Real-time tick source on a background thread
//! - [`CarouselController`] - Cursor + autoplay + swipe as one navigable unit
//! - [`ModalSessionManager`] - Open detail record, its gallery, and the scroll lock
//! - [`ShowcasePage`] - Page carousel and modal composed behind one event API
//!
//! # Concurrency model
//!
//! Everything here runs on the host's UI thread, one event at a time. The
//! only background work is the optional [`ThreadTicker`], which posts
//! stateless ticks over a channel; controllers apply them on their own
//! thread and only while autoplay is still enabled.

pub mod autoplay;
pub mod controller;
pub mod error;
pub mod modal;
pub mod page;
pub mod scroll_lock;
pub mod ticker;

pub use autoplay::{AutoplayTimer, ElapsedClock, TickSource, TimerBackend};
pub use controller::{
    AutoplayState, CarouselController, CarouselOptions, CarouselSnapshot, NavCause, NavChange,
};
pub use error::{EngineError, TimerError};
pub use modal::{DetailRecord, ModalAction, ModalSessionManager};
pub use page::{ModalView, PageEvent, PageView, ShowcasePage, ShowcasePageBuilder};
pub use scroll_lock::{NoopScrollLock, ScrollLockGuard, ScrollLockPort, ScrollLockProbe};
pub use ticker::{StopSignal, ThreadTicker};

pub use vitrine_core::{
    AutoplayPolicy, Direction, EngineConfig, IndexCursor, NavEvent, NavKey, NavigationError,
    Sequence, SwipeConfig, SwipeIntent, SwipeTracker,
};

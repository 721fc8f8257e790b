#![forbid(unsafe_code)]

//! Canonical carousel input events.
//!
//! Hosts translate their native pointer, touch, click, and key events into
//! [`NavEvent`] before handing them to a controller. Pointer and touch
//! collapse into the same variants; only the x-coordinate matters.

/// Keys a carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Arrow left: previous item.
    Left,
    /// Arrow right: next item.
    Right,
    /// Escape: close the surrounding modal, if any.
    Escape,
}

/// A single input event for one carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    /// Pointer or touch went down at this x-coordinate.
    PointerDown { x: f32 },
    /// Pointer or touch moved to this x-coordinate.
    PointerMove { x: f32 },
    /// Pointer or touch released.
    PointerUp,
    /// The platform cancelled the gesture (touch-cancel, pointer capture lost).
    PointerCancel,
    /// "Next" control clicked.
    Next,
    /// "Previous" control clicked.
    Previous,
    /// Indicator for `index` clicked.
    GoTo(usize),
    /// Key press.
    Key(NavKey),
}

impl NavEvent {
    /// Whether this event is part of a pointer gesture.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerMove { .. }
                | Self::PointerUp
                | Self::PointerCancel
        )
    }
}

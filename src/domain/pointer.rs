//! Raw pointer input.

use std::time::Instant;

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse button.
    Mouse,
    /// Stylus.
    Pen,
    /// Finger on a touch surface.
    Touch,
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Contact started.
    Down,
    /// Contact ended.
    Up,
    /// Contact was interrupted by the platform.
    Cancel,
}

/// A single raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    /// Producing device.
    pub kind: PointerKind,
    /// Event phase.
    pub phase: PointerPhase,
    /// Event time.
    pub time: Instant,
}

impl PointerInput {
    /// Creates a pointer event.
    #[must_use]
    pub const fn new(kind: PointerKind, phase: PointerPhase, time: Instant) -> Self {
        Self { kind, phase, time }
    }
}

/// Region of the list configuration panel hit by a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The configuration name input.
    NameInput,
    /// The collapsible filter/sort/setting menus.
    CollapsibleMenus,
    /// Anywhere else.
    Outside,
}

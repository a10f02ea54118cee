//! Terminal event adaptation.

use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

use crate::domain::{PointerInput, PointerKind, PointerPhase, PointerTarget};

/// Rectangular screen region in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitArea {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl HitArea {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && (column - self.x) < self.width
            && (row - self.y) < self.height
    }
}

/// Screen regions of the list configuration panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub name_input: HitArea,
    pub menus: HitArea,
}

impl PanelLayout {
    /// Classifies a cell position.
    #[must_use]
    pub const fn target(&self, column: u16, row: u16) -> PointerTarget {
        if self.name_input.contains(column, row) {
            PointerTarget::NameInput
        } else if self.menus.contains(column, row) {
            PointerTarget::CollapsibleMenus
        } else {
            PointerTarget::Outside
        }
    }
}

/// Converts a terminal event into pointer input.
///
/// Only the primary button counts as a contact. Losing terminal focus
/// cancels any press in progress.
#[must_use]
pub fn pointer_input(event: &Event, now: Instant) -> Option<PointerInput> {
    let phase = match event {
        Event::Mouse(MouseEvent { kind, .. }) => match kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return None,
        },
        Event::FocusLost => PointerPhase::Cancel,
        _ => return None,
    };
    Some(PointerInput::new(PointerKind::Mouse, phase, now))
}

/// Returns the position of a primary-button press.
#[must_use]
pub const fn press_position(event: &Event) -> Option<(u16, u16)> {
    match event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some((*column, *row)),
        _ => None,
    }
}

//! Presentation layer with UI components and event handling.

/// Terminal event adaptation.
pub mod events;
/// Stateful UI components.
pub mod widgets;

pub use events::{HitArea, PanelLayout, pointer_input};
pub use widgets::{EntityListItem, EntityListItemMode, ListConfigPanel};

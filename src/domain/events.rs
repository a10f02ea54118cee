//! Semantic events crossing component boundaries.

use std::time::Instant;

use crate::domain::entities::ListConfigId;

/// Events emitted by list and item components for their hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A pointer went down on an item.
    PointerDown {
        time: Instant,
    },
    /// A pointer was released before the hold threshold (a tap).
    PointerUp {
        time: Instant,
    },
    /// A pointer was held past the hold threshold.
    PointerLongPress {
        time: Instant,
    },
    /// The active list configuration changed.
    ConfigChanged {
        id: ListConfigId,
    },
    /// The entity list must be reloaded from storage.
    ListReload,
    /// The entity list must be re-sorted locally.
    ListResync,
    /// The list filter was edited.
    FilterUpdated,
    /// The list sort was edited.
    SortUpdated,
    /// Themes were replaced locally.
    ThemesUpdated {
        themes: Vec<String>,
    },
    /// Themes were persisted.
    ThemesSaved {
        themes: Vec<String>,
    },
}

impl UiEvent {
    /// Returns the event name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer-down",
            Self::PointerUp { .. } => "pointer-up",
            Self::PointerLongPress { .. } => "pointer-long-press",
            Self::ConfigChanged { .. } => "config-changed",
            Self::ListReload => "list-reload",
            Self::ListResync => "list-resync",
            Self::FilterUpdated => "filter-updated",
            Self::SortUpdated => "sort-updated",
            Self::ThemesUpdated { .. } => "themes-updated",
            Self::ThemesSaved { .. } => "themes-saved",
        }
    }
}

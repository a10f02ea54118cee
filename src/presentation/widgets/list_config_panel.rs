//! List configuration panel: carousel, name editor, menus and toggles.

use std::sync::Arc;
use std::time::Instant;

use bitflags::bitflags;
use crossterm::event::Event;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::services::{
    AddOutcome, CarouselNavigator, DeleteOutcome, ListConfigSynchronizer, LoadOutcome,
    SaveOutcome, SelectOutcome, WriteOutcome,
};
use crate::application::store::{ChangeKind, StoreAction, StoreChange, StoreHandle};
use crate::domain::PointerTarget;
use crate::presentation::events::{PanelLayout, press_position};

bitflags! {
    /// Overlays the panel can show on top of the carousel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PanelOverlays: u8 {
        const THEME_MANAGER = 1 << 0;
        const DELETE_CONFIRM = 1 << 1;
    }
}

/// Collapsible query menus under the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSection {
    Filter,
    Sort,
    Setting,
}

impl PanelSection {
    /// Key under which the open state lives in the store.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Filter => "list-config-filter",
            Self::Sort => "list-config-sort",
            Self::Setting => "list-config-setting",
        }
    }
}

/// Interactive panel over the active list configuration.
pub struct ListConfigPanel {
    sync: Arc<ListConfigSynchronizer>,
    store: StoreHandle,
    navigator: CarouselNavigator,
    changes: mpsc::UnboundedReceiver<StoreChange>,
    overlays: PanelOverlays,
    layout: PanelLayout,
}

impl ListConfigPanel {
    #[must_use]
    pub fn new(sync: Arc<ListConfigSynchronizer>, store: StoreHandle, view_only: bool) -> Self {
        let changes = store.subscribe();
        Self {
            navigator: CarouselNavigator::new(store.clone(), view_only),
            sync,
            store,
            changes,
            overlays: PanelOverlays::empty(),
            layout: PanelLayout::default(),
        }
    }

    /// Loads the collection, creates a first configuration when none exists
    /// and positions the carousel.
    pub async fn mount(&mut self) -> LoadOutcome {
        let outcome = self.sync.load().await;
        if matches!(outcome, LoadOutcome::Loaded { .. })
            && let Some(AddOutcome::Added(id)) = self.sync.setup().await
        {
            debug!(id = %id, "Created initial list config");
        }
        self.drain_changes();
        self.navigator.sync_to_active();
        outcome
    }

    /// Applies pending store notifications. Returns how many were handled.
    pub fn drain_changes(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(change) = self.changes.try_recv() {
            self.navigator.on_store_change(&change);
            if change.kind == ChangeKind::ActiveConfig && !self.navigator.name_in_focus() {
                self.sync.sync();
            }
            handled += 1;
        }
        handled
    }

    /// Runs time-based work: store notifications and the blur settle window.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.drain_changes();
        self.navigator.poll_pending_close(now)
    }

    /// Carousel swipe to `index`.
    pub async fn swipe(&mut self, index: usize) -> SelectOutcome {
        let Some(id) = self.navigator.on_slide_changed(index) else {
            return SelectOutcome::Unknown;
        };
        let outcome = self.sync.select(&id).await;
        self.drain_changes();
        outcome
    }

    pub fn enable_edit_mode(&mut self) -> bool {
        self.navigator.enable_edit_mode()
    }

    pub fn toggle_select_mode(&mut self) {
        self.navigator.toggle_select_mode();
    }

    pub fn set_layout(&mut self, layout: PanelLayout) {
        self.layout = layout;
    }

    /// Routes a terminal event. Returns true when it closed edit mode.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Some((column, row)) = press_position(event) else {
            return false;
        };
        let target = self.layout.target(column, row);
        self.pointer(target)
    }

    /// Pointer interaction on a panel region.
    pub fn pointer(&mut self, target: PointerTarget) -> bool {
        self.navigator.handle_pointer(target)
    }

    pub fn focus_name(&mut self) {
        self.navigator.name_focused();
    }

    pub fn type_name(&self, name: impl Into<String>) {
        self.sync.rename(name);
    }

    /// Enter in the name input: save and leave edit mode.
    pub async fn submit_name(&mut self) -> SaveOutcome {
        let outcome = self.sync.save().await;
        self.navigator.name_submitted();
        self.drain_changes();
        outcome
    }

    /// Name input lost focus: save now, leave edit mode after the settle window.
    pub async fn blur_name(&mut self, now: Instant) -> SaveOutcome {
        self.navigator.name_blurred(now);
        let outcome = self.sync.save().await;
        self.drain_changes();
        outcome
    }

    pub async fn add(&mut self) -> AddOutcome {
        let outcome = self.sync.add().await;
        self.drain_changes();
        outcome
    }

    pub fn toggle_theme_manager(&mut self) {
        self.overlays.toggle(PanelOverlays::THEME_MANAGER);
    }

    /// Opens the delete confirmation.
    pub fn request_delete(&mut self) {
        self.overlays.insert(PanelOverlays::DELETE_CONFIRM);
    }

    /// Answers the delete confirmation. Declining only closes it.
    pub async fn confirm_delete(&mut self, confirmed: bool) -> Option<DeleteOutcome> {
        self.overlays.remove(PanelOverlays::DELETE_CONFIRM);
        if !confirmed {
            return None;
        }
        let outcome = self.sync.delete().await;
        self.drain_changes();
        Some(outcome)
    }

    pub fn update_themes(&self, themes: Vec<String>) {
        self.sync.update_themes(themes);
    }

    pub async fn save_themes(&mut self, themes: Vec<String>) -> WriteOutcome {
        self.sync.save_themes(themes).await
    }

    /// The filter menu committed a change: persist it and close the menu.
    pub async fn filter_updated(&mut self) -> WriteOutcome {
        let outcome = self.sync.filter_updated().await;
        self.set_section(PanelSection::Filter, false);
        outcome
    }

    /// The sort menu committed a change: persist it and close the menu.
    pub async fn sort_updated(&mut self) -> WriteOutcome {
        let outcome = self.sync.sort_updated().await;
        self.set_section(PanelSection::Sort, false);
        outcome
    }

    /// Display settings changed. The menu stays open.
    pub fn setting_updated(&self) {
        self.sync.setting_updated();
    }

    /// Opens or closes a query menu.
    pub fn toggle_section(&self, section: PanelSection) {
        self.set_section(section, !self.section_open(section));
    }

    fn set_section(&self, section: PanelSection, open: bool) {
        self.store.dispatch(StoreAction::SetCollapsablePanelState {
            panel: section.key().to_string(),
            open,
        });
    }

    #[must_use]
    pub fn section_open(&self, section: PanelSection) -> bool {
        self.store
            .select(|store| store.collapsable_panel_open(section.key()))
    }

    #[must_use]
    pub const fn overlays(&self) -> PanelOverlays {
        self.overlays
    }

    #[must_use]
    pub const fn navigation_index(&self) -> usize {
        self.navigator.navigation_index()
    }

    /// Name shown in the editor.
    #[must_use]
    pub fn title(&self) -> String {
        self.sync.buffered_name()
    }

    /// Whether the editor holds unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.sync.in_sync()
    }

    #[must_use]
    pub fn class_names(&self) -> Vec<&'static str> {
        self.navigator.classes().names()
    }
}

impl std::fmt::Debug for ListConfigPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListConfigPanel")
            .field("navigator", &self.navigator)
            .field("overlays", &self.overlays)
            .finish_non_exhaustive()
    }
}

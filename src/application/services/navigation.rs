//! Carousel navigation over the ordered list configurations.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::application::store::{ChangeKind, StoreAction, StoreChange, StoreHandle};
use crate::domain::PointerTarget;
use crate::domain::entities::ListConfigId;

/// Time a blurred name input waits before leaving edit mode.
pub const BLUR_SETTLE: Duration = Duration::from_millis(200);

bitflags::bitflags! {
    /// Presentation classes of the list configuration panel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ListConfigClasses: u8 {
        const CONFIG_MODE = 1 << 0;
        const EDIT_MODE = 1 << 1;
        const VIEW_ONLY = 1 << 2;
    }
}

impl ListConfigClasses {
    /// Class names in render order, always starting with `list-config`.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = vec!["list-config"];
        if self.contains(Self::CONFIG_MODE) {
            names.push("config-mode");
        }
        if self.contains(Self::EDIT_MODE) {
            names.push("edit-mode");
        }
        if self.contains(Self::VIEW_ONLY) {
            names.push("view-only");
        }
        names
    }
}

/// Maps between the carousel position and the store's active configuration.
///
/// Each direction is a one-way lookup: id changes and collection replacement
/// recompute the index, a swipe resolves the index to an id. Neither mapping
/// triggers the other.
#[derive(Debug)]
pub struct CarouselNavigator {
    store: StoreHandle,
    navigation_index: usize,
    view_only: bool,
    name_in_focus: bool,
    menus_in_focus: bool,
    pending_close: Option<Instant>,
}

impl CarouselNavigator {
    #[must_use]
    pub fn new(store: StoreHandle, view_only: bool) -> Self {
        Self {
            store,
            navigation_index: 0,
            view_only,
            name_in_focus: false,
            menus_in_focus: false,
            pending_close: None,
        }
    }

    #[must_use]
    pub const fn navigation_index(&self) -> usize {
        self.navigation_index
    }

    #[must_use]
    pub const fn view_only(&self) -> bool {
        self.view_only
    }

    /// Recomputes the index from the active id. Leaves it unchanged when the
    /// id does not resolve.
    pub fn sync_to_active(&mut self) {
        let position = self.store.select(|store| {
            store
                .list_config_id()
                .and_then(|id| store.list_config_position(id))
        });

        if let Some(index) = position {
            self.navigation_index = index;
        }
    }

    /// Reacts to a committed store action.
    pub fn on_store_change(&mut self, change: &StoreChange) {
        if matches!(change.kind, ChangeKind::ActiveConfig | ChangeKind::Configs) {
            self.sync_to_active();
        }
    }

    /// Handles a swipe and returns the id the carousel now shows.
    ///
    /// Leaves edit and select modes first. The carousel is infinite, so the
    /// index wraps around the collection length.
    pub fn on_slide_changed(&mut self, index: usize) -> Option<ListConfigId> {
        self.store
            .dispatch(StoreAction::SetEditListConfigMode(false));
        self.store
            .dispatch(StoreAction::SetSelectListConfigMode(false));

        let (wrapped, id) = self.store.select(|store| {
            let configs = store.list_configs();
            if configs.is_empty() {
                return None;
            }
            let wrapped = index % configs.len();
            Some((wrapped, configs[wrapped].id.clone()))
        })?;

        debug!(index, wrapped, id = %id, "Carousel slide changed");
        self.navigation_index = wrapped;
        Some(id)
    }

    /// Enters edit mode unless the panel is view-only.
    pub fn enable_edit_mode(&mut self) -> bool {
        if self.view_only {
            return false;
        }
        self.store.dispatch(StoreAction::SetEditListConfigMode(true));
        true
    }

    /// Toggles the configuration selector.
    pub fn toggle_select_mode(&mut self) {
        let current = self.store.select(|store| store.select_list_config_mode());
        self.store
            .dispatch(StoreAction::SetSelectListConfigMode(!current));
    }

    /// Handles a pointer interaction anywhere in the window.
    ///
    /// Returns true when the interaction closed edit mode.
    pub fn handle_pointer(&mut self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::CollapsibleMenus => {
                self.menus_in_focus = true;
                false
            }
            PointerTarget::NameInput => {
                self.menus_in_focus = false;
                false
            }
            PointerTarget::Outside => {
                self.menus_in_focus = false;
                if self.name_in_focus {
                    return false;
                }
                self.exit_edit_mode()
            }
        }
    }

    pub fn name_focused(&mut self) {
        self.name_in_focus = true;
    }

    /// Name input lost focus. Edit mode closes after [`BLUR_SETTLE`] unless a
    /// pointer lands in the menus meanwhile.
    pub fn name_blurred(&mut self, now: Instant) {
        self.name_in_focus = false;
        self.pending_close = Some(now + BLUR_SETTLE);
    }

    /// Name input was submitted.
    pub fn name_submitted(&mut self) {
        self.name_in_focus = false;
        self.pending_close = None;
        self.exit_edit_mode();
    }

    /// Deadline of a pending blur close, if any.
    #[must_use]
    pub const fn pending_close(&self) -> Option<Instant> {
        self.pending_close
    }

    /// Runs a pending blur close whose deadline has passed.
    pub fn poll_pending_close(&mut self, now: Instant) -> bool {
        match self.pending_close {
            Some(deadline) if now >= deadline => {
                self.pending_close = None;
                if self.menus_in_focus {
                    return false;
                }
                self.exit_edit_mode()
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn name_in_focus(&self) -> bool {
        self.name_in_focus
    }

    /// Current presentation classes.
    #[must_use]
    pub fn classes(&self) -> ListConfigClasses {
        let (config_mode, edit_mode) = self.store.select(|store| {
            (
                store.select_list_config_mode(),
                store.edit_list_config_mode(),
            )
        });

        let mut classes = ListConfigClasses::empty();
        classes.set(ListConfigClasses::CONFIG_MODE, config_mode);
        classes.set(ListConfigClasses::EDIT_MODE, edit_mode);
        classes.set(ListConfigClasses::VIEW_ONLY, self.view_only);
        classes
    }

    fn exit_edit_mode(&self) -> bool {
        if !self.store.select(|store| store.edit_list_config_mode()) {
            return false;
        }
        self.store
            .dispatch(StoreAction::SetEditListConfigMode(false));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ListConfig;

    fn store_with(ids: &[&str], active: Option<&str>) -> StoreHandle {
        let store = StoreHandle::default();
        store.dispatch(StoreAction::SetListConfigs(
            ids.iter().map(|id| ListConfig::new(*id, *id)).collect(),
        ));
        if let Some(id) = active {
            store.dispatch(StoreAction::SelectListConfig(id.to_string()));
        }
        store
    }

    fn edit_mode(store: &StoreHandle) -> bool {
        store.select(|s| s.edit_list_config_mode())
    }

    #[test]
    fn test_index_follows_external_id_change() {
        let store = store_with(&["a", "b", "c"], Some("a"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        let mut changes = store.subscribe();

        store.dispatch(StoreAction::SelectListConfig("c".to_string()));
        nav.on_store_change(&changes.try_recv().unwrap());

        assert_eq!(nav.navigation_index(), 2);
    }

    #[test]
    fn test_index_follows_collection_replacement() {
        let store = store_with(&["a", "b", "c"], Some("c"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        nav.sync_to_active();
        assert_eq!(nav.navigation_index(), 2);

        store.dispatch(StoreAction::SetListConfigs(vec![
            ListConfig::new("c", "c"),
            ListConfig::new("a", "a"),
        ]));
        nav.sync_to_active();

        assert_eq!(nav.navigation_index(), 0);
    }

    #[test]
    fn test_unresolved_id_keeps_index() {
        let store = store_with(&["a", "b"], Some("b"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        nav.sync_to_active();

        store.dispatch(StoreAction::SelectListConfig("gone".to_string()));
        nav.sync_to_active();

        assert_eq!(nav.navigation_index(), 1);
    }

    #[test]
    fn test_slide_change_wraps_and_exits_modes() {
        let store = store_with(&["a", "b", "c"], Some("a"));
        store.dispatch(StoreAction::SetEditListConfigMode(true));
        store.dispatch(StoreAction::SetSelectListConfigMode(true));
        let mut nav = CarouselNavigator::new(store.clone(), false);

        let id = nav.on_slide_changed(4);

        assert_eq!(id.as_deref(), Some("b"));
        assert_eq!(nav.navigation_index(), 1);
        assert!(!edit_mode(&store));
        assert!(!store.select(|s| s.select_list_config_mode()));
        assert_eq!(store.select(|s| s.list_config_id().map(str::to_string)), Some("a".to_string()));
    }

    #[test]
    fn test_slide_change_on_empty_collection() {
        let store = store_with(&[], None);
        let mut nav = CarouselNavigator::new(store, false);

        assert_eq!(nav.on_slide_changed(0), None);
    }

    #[test]
    fn test_view_only_blocks_edit_mode() {
        let store = store_with(&["a"], Some("a"));
        let mut nav = CarouselNavigator::new(store.clone(), true);

        assert!(!nav.enable_edit_mode());
        assert!(!edit_mode(&store));
        assert!(nav.classes().contains(ListConfigClasses::VIEW_ONLY));
    }

    #[test]
    fn test_outside_pointer_exits_edit_mode() {
        let store = store_with(&["a"], Some("a"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        nav.enable_edit_mode();

        assert!(!nav.handle_pointer(PointerTarget::CollapsibleMenus));
        assert!(!nav.handle_pointer(PointerTarget::NameInput));
        assert!(edit_mode(&store));

        assert!(nav.handle_pointer(PointerTarget::Outside));
        assert!(!edit_mode(&store));
    }

    #[test]
    fn test_name_focus_takes_precedence_over_outside_pointer() {
        let store = store_with(&["a"], Some("a"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        nav.enable_edit_mode();
        nav.name_focused();

        assert!(!nav.handle_pointer(PointerTarget::Outside));
        assert!(edit_mode(&store));
    }

    #[test]
    fn test_blur_closes_after_settle_window() {
        let store = store_with(&["a"], Some("a"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        nav.enable_edit_mode();
        nav.name_focused();
        let t0 = Instant::now();

        nav.name_blurred(t0);
        assert!(!nav.poll_pending_close(t0 + Duration::from_millis(100)));
        assert!(edit_mode(&store));

        assert!(nav.poll_pending_close(t0 + BLUR_SETTLE));
        assert!(!edit_mode(&store));
        assert_eq!(nav.pending_close(), None);
    }

    #[test]
    fn test_blur_close_skipped_when_menus_focused() {
        let store = store_with(&["a"], Some("a"));
        let mut nav = CarouselNavigator::new(store.clone(), false);
        nav.enable_edit_mode();
        let t0 = Instant::now();

        nav.name_blurred(t0);
        nav.handle_pointer(PointerTarget::CollapsibleMenus);

        assert!(!nav.poll_pending_close(t0 + BLUR_SETTLE));
        assert!(edit_mode(&store));
    }

    #[test]
    fn test_class_names() {
        let store = store_with(&["a"], Some("a"));
        let mut nav = CarouselNavigator::new(store, false);
        nav.enable_edit_mode();
        nav.toggle_select_mode();

        assert_eq!(
            nav.classes().names(),
            vec!["list-config", "config-mode", "edit-mode"]
        );
    }
}

//! A single entity in the list.

use tokio::sync::mpsc;

use crate::application::services::{EntityView, GestureDriver, GestureRecognizer, PropertyRenderer};
use crate::application::store::StoreHandle;
use crate::domain::entities::Entity;
use crate::domain::{PointerInput, UiEvent};

/// Display mode of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityListItemMode {
    /// Compact summary.
    #[default]
    Preview,
    /// Every property expanded.
    Full,
    /// Editing form. Pointer gestures are not recognized here.
    Edit,
}

impl EntityListItemMode {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Full => "full",
            Self::Edit => "edit",
        }
    }
}

/// List item state: display mode plus the gesture driver for its surface.
pub struct EntityListItem {
    entity: Entity,
    mode: EntityListItemMode,
    store: StoreHandle,
    gestures: GestureDriver,
}

impl EntityListItem {
    /// Creates an item whose gestures are reported on `events`.
    #[must_use]
    pub fn new(
        entity: Entity,
        store: StoreHandle,
        touch_enabled: bool,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            entity,
            mode: EntityListItemMode::Preview,
            store,
            gestures: GestureDriver::new(GestureRecognizer::new(touch_enabled), events),
        }
    }

    #[must_use]
    pub const fn entity(&self) -> &Entity {
        &self.entity
    }

    #[must_use]
    pub const fn mode(&self) -> EntityListItemMode {
        self.mode
    }

    /// Switches mode. Entering edit mode abandons any press in progress.
    pub fn set_mode(&mut self, mode: EntityListItemMode) {
        if mode == EntityListItemMode::Edit {
            self.gestures.cancel();
        }
        self.mode = mode;
    }

    pub fn show_full(&mut self) {
        self.set_mode(EntityListItemMode::Full);
    }

    pub fn show_edit(&mut self) {
        self.set_mode(EntityListItemMode::Edit);
    }

    /// The edit form finished, either saved or canceled.
    pub fn edit_finished(&mut self, updated: Option<Entity>) {
        if let Some(entity) = updated {
            self.entity = entity;
        }
        self.mode = EntityListItemMode::Preview;
    }

    /// Feeds pointer input on the item surface. Must run inside a tokio runtime.
    pub fn handle_pointer(&mut self, input: PointerInput) {
        if self.mode == EntityListItemMode::Edit {
            return;
        }
        self.gestures.handle(input);
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.store.select(|store| store.is_selected(self.entity.id))
    }

    #[must_use]
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut names = vec!["entity-list-item"];
        if self.is_selected() {
            names.push("selected");
        }
        names.push(self.mode.class_name());
        names
    }

    /// Renders the entity against the schemas held in the store.
    #[must_use]
    pub fn view(&self, renderer: &PropertyRenderer) -> EntityView {
        self.store
            .select(|store| renderer.render_entity(&self.entity, store.entity_configs()))
    }
}

impl std::fmt::Debug for EntityListItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityListItem")
            .field("id", &self.entity.id)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{DisplayValue, RenderedProperty};
    use crate::application::store::{AppStore, StoreAction};
    use crate::domain::entities::{
        DataType, EntityConfig, EntityProperty, EntityPropertyConfig, PropertyValue,
    };
    use crate::domain::ports::mocks::IsoDateTimeFormat;
    use crate::domain::{PointerKind, PointerPhase};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use std::time::Duration;

    fn entity() -> Entity {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Entity {
            id: 7,
            entity_config_id: 1,
            created_at: created,
            updated_at: created,
            tags: vec!["book".to_string()],
            properties: vec![EntityProperty::new(1, 10, PropertyValue::Int(320))],
        }
    }

    fn item(touch_enabled: bool) -> (EntityListItem, StoreHandle, mpsc::UnboundedReceiver<UiEvent>) {
        let store = StoreHandle::new(AppStore::default());
        let (tx, rx) = mpsc::unbounded_channel();
        (EntityListItem::new(entity(), store.clone(), touch_enabled, tx), store, rx)
    }

    fn names(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<&'static str> {
        let mut names = Vec::new();
        while let Ok(event) = rx.try_recv() {
            names.push(event.name());
        }
        names
    }

    fn input(kind: PointerKind, phase: PointerPhase) -> PointerInput {
        PointerInput::new(kind, phase, tokio::time::Instant::now().into_std())
    }

    #[test]
    fn test_classes_follow_mode_and_selection() {
        let (mut item, store, _rx) = item(true);
        assert_eq!(item.class_names(), vec!["entity-list-item", "preview"]);

        store.dispatch(StoreAction::AddActionToSelection(7));
        item.show_full();
        assert_eq!(item.class_names(), vec!["entity-list-item", "selected", "full"]);

        item.show_edit();
        item.edit_finished(None);
        assert_eq!(item.mode(), EntityListItemMode::Preview);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_in_preview_mode() {
        let (mut item, _store, mut rx) = item(true);

        item.handle_pointer(input(PointerKind::Mouse, PointerPhase::Down));
        tokio::time::sleep(Duration::from_millis(100)).await;
        item.handle_pointer(input(PointerKind::Mouse, PointerPhase::Up));

        assert_eq!(names(&mut rx), vec!["pointer-down", "pointer-up"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_mode_ignores_pointer() {
        let (mut item, _store, mut rx) = item(true);
        item.show_edit();

        item.handle_pointer(input(PointerKind::Mouse, PointerPhase::Down));
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert!(names(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entering_edit_mode_abandons_press() {
        let (mut item, _store, mut rx) = item(true);

        item.handle_pointer(input(PointerKind::Mouse, PointerPhase::Down));
        item.show_edit();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(names(&mut rx), vec!["pointer-down"]);

        item.edit_finished(None);
        item.handle_pointer(input(PointerKind::Mouse, PointerPhase::Down));
        tokio::time::sleep(Duration::from_millis(100)).await;
        item.handle_pointer(input(PointerKind::Mouse, PointerPhase::Up));
        assert_eq!(names(&mut rx), vec!["pointer-down", "pointer-up"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_follows_setting() {
        let (mut enabled, _store, mut rx) = item(true);
        enabled.handle_pointer(input(PointerKind::Touch, PointerPhase::Down));
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(names(&mut rx), vec!["pointer-down", "pointer-long-press"]);

        let (mut disabled, _store, mut rx) = item(false);
        disabled.handle_pointer(input(PointerKind::Touch, PointerPhase::Down));
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(names(&mut rx).is_empty());
    }

    #[test]
    fn test_view_uses_store_schemas() {
        let (item, store, _rx) = item(true);
        store.dispatch(StoreAction::SetEntityConfigs(vec![EntityConfig {
            id: 1,
            name: "Book".to_string(),
            description: String::new(),
            properties: vec![EntityPropertyConfig::new(10, "Pages", DataType::Int)],
        }]));
        let renderer = PropertyRenderer::new(Arc::new(IsoDateTimeFormat));

        let view = item.view(&renderer);

        assert_eq!(view.created_at, "2024-03-01 09:00");
        assert_eq!(view.updated_at, None);
        let [RenderedProperty::Row(row)] = view.properties.as_slice() else {
            panic!("expected a single row");
        };
        assert_eq!(row.value, DisplayValue::Number(320));
    }
}

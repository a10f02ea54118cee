//! Central client state.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::domain::entities::{
    AuthToken, Entity, EntityConfig, EntityId, EntityPropertyConfig, ListConfig, ListConfigId,
    ListContext, ListFilter, ListSort, PropertyConfigId, Settings, ThemeName,
};

use super::StoreAction;

/// Cross-cutting UI state.
///
/// Fields are private; [`AppStore::apply`] is the only mutation path and every
/// action runs to completion before it returns. Derived views are computed on
/// read from the base fields.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default)]
pub struct AppStore {
    entity_configs: Vec<EntityConfig>,
    list_items: Vec<Entity>,
    action_suggestions: Vec<String>,
    tag_suggestions: Vec<String>,
    loading: bool,
    list_filter: ListFilter,
    list_sort: ListSort,
    list_setting: Settings,
    advanced_mode: bool,
    debug_mode: bool,
    select_mode: bool,
    edit_list_config_mode: bool,
    select_list_config_mode: bool,
    selected_actions: Vec<EntityId>,
    forbidden: bool,
    auth_token: Option<AuthToken>,
    last_list_url: String,
    theme: ThemeName,
    list_config_id: Option<ListConfigId>,
    list_configs: Vec<ListConfig>,
    has_fetched_list_configs: bool,
    list_context_mode: bool,
    list_context: ListContext,
    collapsable_panel_state: HashMap<String, bool>,
    tab_state: HashMap<String, usize>,
    entity_property_instances: HashMap<PropertyConfigId, i64>,
    widget_is_open: bool,
    revision: u64,
}

impl AppStore {
    /// Creates a store with default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action atomically.
    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::SetActionSuggestions(suggestions) => {
                self.action_suggestions = suggestions;
            }
            StoreAction::SetTagSuggestions(suggestions) => self.tag_suggestions = suggestions,
            StoreAction::AddTagSuggestions(suggestions) => {
                self.tag_suggestions.extend(suggestions);
            }
            StoreAction::RemoveTagSuggestions(suggestions) => {
                self.remove_tag_suggestions(&suggestions);
            }
            StoreAction::SetLoading(state) => self.loading = state,
            StoreAction::SetListFilterTagging { kind, tags } => {
                self.list_filter.tagging.set(kind, tags);
            }
            StoreAction::SetListFilterIncludeUntagged(state) => {
                self.list_filter.include_untagged = state;
            }
            StoreAction::SetListFilterIncludeAll(state) => self.list_filter.include_all = state,
            StoreAction::SetListFilterTime(time) => self.list_filter.time = time,
            StoreAction::SetListFilter(filter) => self.list_filter = filter,
            StoreAction::SetListSort(sort) => self.list_sort = sort,
            StoreAction::SetListSetting(setting) => self.list_setting = setting,
            StoreAction::SetSetting(setting) => {
                self.list_setting.insert(setting.name, setting.value);
            }
            StoreAction::SelectListConfig(id) => self.select_list_config(Some(id)),
            StoreAction::ClearListConfig => self.select_list_config(None),
            StoreAction::SetListConfigs(configs) => {
                self.list_configs = configs;
                self.has_fetched_list_configs = true;
            }
            StoreAction::AddListConfig(config) => {
                self.list_configs.retain(|existing| existing.id != config.id);
                self.list_configs.push(config);
            }
            StoreAction::SetAdvancedMode(state) => self.advanced_mode = state,
            StoreAction::SetDebugMode(state) => self.debug_mode = state,
            StoreAction::SetEditListConfigMode(state) => self.edit_list_config_mode = state,
            StoreAction::SetSelectListConfigMode(state) => self.select_list_config_mode = state,
            StoreAction::SetSelectMode(state) => self.select_mode = state,
            StoreAction::SetSelectedActions(ids) => self.selected_actions = ids,
            StoreAction::AddActionToSelection(id) => self.add_action_to_selection(id),
            StoreAction::RemoveActionFromSelection(id) => self.remove_action_from_selection(id),
            StoreAction::ToggleActionSelection(id) => {
                if self.selected_actions.contains(&id) {
                    self.remove_action_from_selection(id);
                } else {
                    self.add_action_to_selection(id);
                }
            }
            StoreAction::ToggleSelectAll => {
                self.selected_actions = self
                    .list_items
                    .iter()
                    .map(|item| item.id)
                    .filter(|id| !self.selected_actions.contains(id))
                    .collect();
            }
            StoreAction::SelectAll => {
                self.selected_actions = self.list_items.iter().map(|item| item.id).collect();
            }
            StoreAction::SetListItems(items) => self.list_items = items,
            StoreAction::SetListContextMode(state) => self.list_context_mode = state,
            StoreAction::SetListContext(context) => self.list_context = context,
            StoreAction::SetForbidden(state) => self.forbidden = state,
            StoreAction::SetAuthToken(token) => self.auth_token = token,
            StoreAction::SetLastListUrl(url) => self.last_list_url = url,
            StoreAction::SetEntityConfigs(configs) => self.entity_configs = configs,
            StoreAction::SetCollapsablePanelState { panel, open } => {
                self.collapsable_panel_state.insert(panel, open);
            }
            StoreAction::SetTabPaneState { pane, index } => {
                self.tab_state.insert(pane, index);
            }
            StoreAction::SetEntityPropertyInstance {
                property_config_id,
                instance_id,
            } => {
                self.entity_property_instances
                    .insert(property_config_id, instance_id);
            }
            StoreAction::SetTheme(name) => self.theme = ThemeName::parse_or_default(&name),
            StoreAction::SetWidgetIsOpen(state) => self.widget_is_open = state,
            StoreAction::SetThemes(themes) => {
                if let Some(id) = self.list_config_id.as_deref()
                    && let Some(config) = self.list_configs.iter_mut().find(|c| c.id == id)
                {
                    config.themes = themes;
                }
            }
        }
        self.revision += 1;
    }

    fn select_list_config(&mut self, id: Option<ListConfigId>) {
        if let Some(previous) = self.list_config() {
            let contributed = previous.required_tags().to_vec();
            if !contributed.is_empty() {
                self.remove_tag_suggestions(&contributed);
            }
        }

        self.list_config_id = id;

        if let Some(config) = self.list_config() {
            let filter = config.filter.clone();
            let sort = config.sort.clone();
            let setting = config.setting.clone();
            self.list_filter = filter;
            self.list_sort = sort;
            self.list_setting = setting;
        }
    }

    /// Removes one occurrence per contributed tag so suggestions added by
    /// other sources survive.
    fn remove_tag_suggestions(&mut self, contributed: &[String]) {
        for tag in contributed {
            if let Some(position) = self.tag_suggestions.iter().position(|t| t == tag) {
                self.tag_suggestions.remove(position);
            }
        }
    }

    fn add_action_to_selection(&mut self, id: EntityId) {
        self.selected_actions.retain(|existing| *existing != id);
        self.selected_actions.push(id);
        self.select_mode = true;
    }

    fn remove_action_from_selection(&mut self, id: EntityId) {
        self.selected_actions.retain(|existing| *existing != id);
        self.select_mode = !self.selected_actions.is_empty();
    }

    /// Active configuration, if the active id resolves.
    #[must_use]
    pub fn list_config(&self) -> Option<&ListConfig> {
        let id = self.list_config_id.as_deref()?;
        self.list_configs.iter().find(|config| config.id == id)
    }

    /// Active configuration or the default fallback.
    #[must_use]
    pub fn list_config_or_default(&self) -> Cow<'_, ListConfig> {
        self.list_config()
            .map_or_else(|| Cow::Owned(ListConfig::default()), Cow::Borrowed)
    }

    /// Position of a configuration in the ordered collection.
    #[must_use]
    pub fn list_config_position(&self, id: &str) -> Option<usize> {
        self.list_configs.iter().position(|config| config.id == id)
    }

    /// Property schemas of every entity schema, flattened in order.
    #[must_use]
    pub fn property_configs(&self) -> Vec<&EntityPropertyConfig> {
        self.entity_configs
            .iter()
            .flat_map(|config| config.properties.iter())
            .collect()
    }

    /// Resolves an entity schema by id.
    #[must_use]
    pub fn entity_config(&self, id: i64) -> Option<&EntityConfig> {
        self.entity_configs.iter().find(|config| config.id == id)
    }

    /// Returns whether an entity is part of the action selection.
    #[must_use]
    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected_actions.contains(&id)
    }

    /// Number of committed actions.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn list_config_id(&self) -> Option<&str> {
        self.list_config_id.as_deref()
    }

    #[must_use]
    pub fn list_configs(&self) -> &[ListConfig] {
        &self.list_configs
    }

    #[must_use]
    pub const fn has_fetched_list_configs(&self) -> bool {
        self.has_fetched_list_configs
    }

    #[must_use]
    pub const fn list_filter(&self) -> &ListFilter {
        &self.list_filter
    }

    #[must_use]
    pub const fn list_sort(&self) -> &ListSort {
        &self.list_sort
    }

    #[must_use]
    pub const fn list_setting(&self) -> &Settings {
        &self.list_setting
    }

    #[must_use]
    pub const fn list_context(&self) -> &ListContext {
        &self.list_context
    }

    #[must_use]
    pub const fn list_context_mode(&self) -> bool {
        self.list_context_mode
    }

    #[must_use]
    pub fn tag_suggestions(&self) -> &[String] {
        &self.tag_suggestions
    }

    #[must_use]
    pub fn action_suggestions(&self) -> &[String] {
        &self.action_suggestions
    }

    #[must_use]
    pub fn selected_actions(&self) -> &[EntityId] {
        &self.selected_actions
    }

    #[must_use]
    pub fn list_items(&self) -> &[Entity] {
        &self.list_items
    }

    #[must_use]
    pub fn entity_configs(&self) -> &[EntityConfig] {
        &self.entity_configs
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn advanced_mode(&self) -> bool {
        self.advanced_mode
    }

    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    #[must_use]
    pub const fn select_mode(&self) -> bool {
        self.select_mode
    }

    #[must_use]
    pub const fn edit_list_config_mode(&self) -> bool {
        self.edit_list_config_mode
    }

    #[must_use]
    pub const fn select_list_config_mode(&self) -> bool {
        self.select_list_config_mode
    }

    #[must_use]
    pub const fn forbidden(&self) -> bool {
        self.forbidden
    }

    #[must_use]
    pub const fn auth_token(&self) -> Option<&AuthToken> {
        self.auth_token.as_ref()
    }

    #[must_use]
    pub fn last_list_url(&self) -> &str {
        &self.last_list_url
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeName {
        self.theme
    }

    #[must_use]
    pub fn collapsable_panel_open(&self, panel: &str) -> bool {
        self.collapsable_panel_state
            .get(panel)
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn tab_index(&self, pane: &str) -> usize {
        self.tab_state.get(pane).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn entity_property_instance(&self, property_config_id: PropertyConfigId) -> Option<i64> {
        self.entity_property_instances
            .get(&property_config_id)
            .copied()
    }

    #[must_use]
    pub const fn widget_is_open(&self) -> bool {
        self.widget_is_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        ListFilterType, ListSortDirection, Setting, SettingValue, TimeContext,
    };
    use chrono::Utc;

    fn config(id: &str, required: &[&str]) -> ListConfig {
        let mut config = ListConfig::new(id, format!("Config {id}"));
        config.filter.tagging.contains_all_of = required.iter().map(|t| (*t).to_string()).collect();
        config.sort.direction = ListSortDirection::Asc;
        config
            .setting
            .insert(format!("{id}-setting"), SettingValue::Bool(true));
        config
    }

    fn entity(id: EntityId) -> Entity {
        Entity {
            id,
            entity_config_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn store_with(configs: Vec<ListConfig>) -> AppStore {
        let mut store = AppStore::new();
        store.apply(StoreAction::SetListConfigs(configs));
        store
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn test_select_copies_query_shape() {
        let target = config("b", &["work"]);
        let mut store = store_with(vec![config("a", &[]), target.clone()]);

        store.apply(StoreAction::SelectListConfig("b".to_string()));

        assert_eq!(store.list_config_id(), Some("b"));
        assert_eq!(store.list_filter(), &target.filter);
        assert_eq!(store.list_sort(), &target.sort);
        assert_eq!(store.list_setting(), &target.setting);
    }

    #[test]
    fn test_select_copy_is_not_live() {
        let mut store = store_with(vec![config("a", &[])]);
        store.apply(StoreAction::SelectListConfig("a".to_string()));

        store.apply(StoreAction::SetListFilterIncludeAll(false));

        assert!(!store.list_filter().include_all);
        assert!(store.list_config().unwrap().filter.include_all);
    }

    #[test]
    fn test_select_unknown_id_keeps_prior_values() {
        let mut store = store_with(vec![config("a", &[])]);
        store.apply(StoreAction::SelectListConfig("a".to_string()));
        store.apply(StoreAction::SetListFilterTime(TimeContext::AllTime));
        let filter = store.list_filter().clone();
        let sort = store.list_sort().clone();
        let setting = store.list_setting().clone();

        store.apply(StoreAction::SelectListConfig("missing".to_string()));

        assert_eq!(store.list_config_id(), Some("missing"));
        assert!(store.list_config().is_none());
        assert_eq!(store.list_filter(), &filter);
        assert_eq!(store.list_sort(), &sort);
        assert_eq!(store.list_setting(), &setting);
    }

    #[test]
    fn test_switching_away_removes_contributed_tags_only() {
        let mut store = store_with(vec![config("a", &["work", "urgent"]), config("b", &[])]);
        store.apply(StoreAction::SelectListConfig("a".to_string()));
        store.apply(StoreAction::SetTagSuggestions(tags(&["home", "work", "urgent"])));

        store.apply(StoreAction::SelectListConfig("b".to_string()));

        assert_eq!(store.tag_suggestions(), tags(&["home"]));
    }

    #[test]
    fn test_shared_tag_suggestion_survives_switch() {
        let mut store = store_with(vec![config("a", &["work"]), config("b", &[])]);
        store.apply(StoreAction::SelectListConfig("a".to_string()));
        store.apply(StoreAction::AddTagSuggestions(tags(&["work"])));
        store.apply(StoreAction::AddTagSuggestions(tags(&["work", "home"])));

        store.apply(StoreAction::SelectListConfig("b".to_string()));

        assert_eq!(store.tag_suggestions(), tags(&["work", "home"]));
    }

    #[test]
    fn test_clear_list_config_removes_tags_and_keeps_values() {
        let mut store = store_with(vec![config("a", &["work"])]);
        store.apply(StoreAction::SelectListConfig("a".to_string()));
        store.apply(StoreAction::SetTagSuggestions(tags(&["work"])));
        let filter = store.list_filter().clone();

        store.apply(StoreAction::ClearListConfig);

        assert!(store.list_config_id().is_none());
        assert!(store.tag_suggestions().is_empty());
        assert_eq!(store.list_filter(), &filter);
        assert_eq!(store.list_config_or_default().id, ListConfig::DEFAULT_ID);
    }

    #[test]
    fn test_set_list_configs_marks_fetched() {
        let store = store_with(Vec::new());
        assert!(store.has_fetched_list_configs());
    }

    #[test]
    fn test_add_list_config_upserts_at_end() {
        let mut store = store_with(vec![config("a", &[]), config("b", &[])]);
        let mut renamed = config("a", &[]);
        renamed.name = "Renamed".to_string();

        store.apply(StoreAction::AddListConfig(renamed));

        let ids: Vec<&str> = store.list_configs().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.list_configs()[1].name, "Renamed");
    }

    #[test]
    fn test_set_themes_replaces_active_config_themes() {
        let mut store = store_with(vec![config("a", &[]), config("b", &[])]);
        store.apply(StoreAction::SelectListConfig("b".to_string()));

        store.apply(StoreAction::SetThemes(tags(&["forest"])));

        assert!(store.list_configs()[0].themes.is_empty());
        assert_eq!(store.list_config().unwrap().themes, tags(&["forest"]));
    }

    #[test]
    fn test_selection_actions_drive_select_mode() {
        let mut store = AppStore::new();

        store.apply(StoreAction::AddActionToSelection(1));
        store.apply(StoreAction::AddActionToSelection(2));
        store.apply(StoreAction::AddActionToSelection(1));
        assert_eq!(store.selected_actions(), [2, 1]);
        assert!(store.select_mode());

        store.apply(StoreAction::ToggleActionSelection(2));
        store.apply(StoreAction::ToggleActionSelection(1));
        assert!(store.selected_actions().is_empty());
        assert!(!store.select_mode());
    }

    #[test]
    fn test_toggle_select_all_inverts_over_list_items() {
        let mut store = AppStore::new();
        store.apply(StoreAction::SetListItems(vec![entity(1), entity(2), entity(3)]));
        store.apply(StoreAction::SetSelectedActions(vec![2]));

        store.apply(StoreAction::ToggleSelectAll);
        assert_eq!(store.selected_actions(), [1, 3]);

        store.apply(StoreAction::SelectAll);
        assert_eq!(store.selected_actions(), [1, 2, 3]);
        assert!(store.is_selected(2));
    }

    #[test]
    fn test_set_theme_validates_name() {
        let mut store = AppStore::new();

        store.apply(StoreAction::SetTheme("dark".to_string()));
        assert_eq!(store.theme(), ThemeName::Dark);

        store.apply(StoreAction::SetTheme("neon".to_string()));
        assert_eq!(store.theme(), ThemeName::default());
    }

    #[test]
    fn test_set_setting_merges_into_settings() {
        let mut store = AppStore::new();
        store.apply(StoreAction::SetSetting(Setting {
            name: "pageSize".to_string(),
            value: SettingValue::Int(50),
        }));
        store.apply(StoreAction::SetListFilterTagging {
            kind: ListFilterType::ContainsOneOf,
            tags: tags(&["x"]),
        });

        assert_eq!(store.list_setting().get("pageSize"), Some(&SettingValue::Int(50)));
        assert_eq!(store.list_filter().tagging.contains_one_of, tags(&["x"]));
    }

    #[test]
    fn test_property_configs_are_derived() {
        use crate::domain::entities::{DataType, EntityPropertyConfig};

        let mut store = AppStore::new();
        store.apply(StoreAction::SetEntityConfigs(vec![
            EntityConfig {
                id: 1,
                name: "Book".to_string(),
                description: String::new(),
                properties: vec![EntityPropertyConfig::new(10, "Title", DataType::ShortText)],
            },
            EntityConfig {
                id: 2,
                name: "Run".to_string(),
                description: String::new(),
                properties: vec![EntityPropertyConfig::new(20, "Km", DataType::Int)],
            },
        ]));

        let ids: Vec<i64> = store.property_configs().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 20]);
        assert!(store.entity_config(2).is_some());
    }

    #[test]
    fn test_revision_counts_actions() {
        let mut store = AppStore::new();
        store.apply(StoreAction::SetLoading(true));
        store.apply(StoreAction::SetLoading(false));
        assert_eq!(store.revision(), 2);
    }
}

//! Named store actions.

use crate::domain::entities::{
    AuthToken, Entity, EntityConfig, EntityId, ListConfig, ListConfigId, ListContext, ListFilter,
    ListFilterType, ListSort, PropertyConfigId, Setting, Settings, TimeContext,
};

/// Every mutation of [`super::AppStore`] is one of these actions.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum StoreAction {
    SetActionSuggestions(Vec<String>),
    SetTagSuggestions(Vec<String>),
    AddTagSuggestions(Vec<String>),
    RemoveTagSuggestions(Vec<String>),
    SetLoading(bool),
    SetListFilterTagging {
        kind: ListFilterType,
        tags: Vec<String>,
    },
    SetListFilterIncludeUntagged(bool),
    SetListFilterIncludeAll(bool),
    SetListFilterTime(TimeContext),
    SetListFilter(ListFilter),
    SetListSort(ListSort),
    SetListSetting(Settings),
    SetSetting(Setting),
    SelectListConfig(ListConfigId),
    ClearListConfig,
    SetListConfigs(Vec<ListConfig>),
    AddListConfig(ListConfig),
    SetAdvancedMode(bool),
    SetDebugMode(bool),
    SetEditListConfigMode(bool),
    SetSelectListConfigMode(bool),
    SetSelectMode(bool),
    SetSelectedActions(Vec<EntityId>),
    AddActionToSelection(EntityId),
    RemoveActionFromSelection(EntityId),
    ToggleActionSelection(EntityId),
    ToggleSelectAll,
    SelectAll,
    SetListItems(Vec<Entity>),
    SetListContextMode(bool),
    SetListContext(ListContext),
    SetForbidden(bool),
    SetAuthToken(Option<AuthToken>),
    SetLastListUrl(String),
    SetEntityConfigs(Vec<EntityConfig>),
    SetCollapsablePanelState {
        panel: String,
        open: bool,
    },
    SetTabPaneState {
        pane: String,
        index: usize,
    },
    SetEntityPropertyInstance {
        property_config_id: PropertyConfigId,
        instance_id: i64,
    },
    SetTheme(String),
    SetWidgetIsOpen(bool),
    SetThemes(Vec<String>),
}

/// Which part of the store an action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The active configuration id changed.
    ActiveConfig,
    /// The configuration collection was replaced or edited.
    Configs,
    /// Any other field.
    Other,
}

impl StoreAction {
    /// Returns the action name used in logs and change records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetActionSuggestions(_) => "setActionSuggestions",
            Self::SetTagSuggestions(_) => "setTagSuggestions",
            Self::AddTagSuggestions(_) => "addTagSuggestions",
            Self::RemoveTagSuggestions(_) => "removeTagSuggestions",
            Self::SetLoading(_) => "setLoading",
            Self::SetListFilterTagging { .. } => "setListFilterTagging",
            Self::SetListFilterIncludeUntagged(_) => "setListFilterIncludeUntagged",
            Self::SetListFilterIncludeAll(_) => "setListFilterIncludeAll",
            Self::SetListFilterTime(_) => "setListFilterTime",
            Self::SetListFilter(_) => "setListFilter",
            Self::SetListSort(_) => "setListSort",
            Self::SetListSetting(_) => "setListSetting",
            Self::SetSetting(_) => "setSetting",
            Self::SelectListConfig(_) => "selectListConfig",
            Self::ClearListConfig => "clearListConfig",
            Self::SetListConfigs(_) => "setListConfigs",
            Self::AddListConfig(_) => "addListConfig",
            Self::SetAdvancedMode(_) => "setAdvancedMode",
            Self::SetDebugMode(_) => "setDebugMode",
            Self::SetEditListConfigMode(_) => "setEditListConfigMode",
            Self::SetSelectListConfigMode(_) => "setSelectListConfigMode",
            Self::SetSelectMode(_) => "setSelectMode",
            Self::SetSelectedActions(_) => "setSelectedActions",
            Self::AddActionToSelection(_) => "addActionToSelection",
            Self::RemoveActionFromSelection(_) => "removeActionFromSelection",
            Self::ToggleActionSelection(_) => "toggleActionSelection",
            Self::ToggleSelectAll => "toggleSelectAll",
            Self::SelectAll => "selectAll",
            Self::SetListItems(_) => "setListItems",
            Self::SetListContextMode(_) => "setListContextMode",
            Self::SetListContext(_) => "setListContext",
            Self::SetForbidden(_) => "setForbidden",
            Self::SetAuthToken(_) => "setAuthToken",
            Self::SetLastListUrl(_) => "setLastListUrl",
            Self::SetEntityConfigs(_) => "setEntityConfigs",
            Self::SetCollapsablePanelState { .. } => "setCollapsablePanelState",
            Self::SetTabPaneState { .. } => "setTabPaneState",
            Self::SetEntityPropertyInstance { .. } => "setEntityPropertyInstance",
            Self::SetTheme(_) => "setTheme",
            Self::SetWidgetIsOpen(_) => "setWidgetIsOpen",
            Self::SetThemes(_) => "setThemes",
        }
    }

    /// Classifies the action for subscribers.
    #[must_use]
    pub const fn change_kind(&self) -> ChangeKind {
        match self {
            Self::SelectListConfig(_) | Self::ClearListConfig => ChangeKind::ActiveConfig,
            Self::SetListConfigs(_) | Self::AddListConfig(_) | Self::SetThemes(_) => {
                ChangeKind::Configs
            }
            _ => ChangeKind::Other,
        }
    }
}

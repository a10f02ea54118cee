//! Domain entity definitions.

mod entity;
mod list;
mod theme;
mod token;

pub use entity::{
    DataType, Entity, EntityConfig, EntityConfigId, EntityId, EntityProperty,
    EntityPropertyConfig, ImageValue, PropertyConfigId, PropertyValue,
};
pub use list::{
    ListConfig, ListConfigId, ListContext, ListContextType, ListContextUnit, ListFilter,
    ListFilterTagging, ListFilterType, ListSort, ListSortDirection, ListSortNativeProperty,
    ListSortProperty, Setting, SettingValue, Settings, TextFilter, TextType, TimeContext,
};
pub use theme::ThemeName;
pub use token::AuthToken;

//! List query value objects and persisted list configurations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EntityConfigId;

/// Unique identifier for a list configuration.
pub type ListConfigId = String;

/// Tag filter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListFilterType {
    /// Entity must carry every listed tag.
    ContainsAllOf,
    /// Entity must carry at least one listed tag.
    ContainsOneOf,
}

/// Tag filters keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilterTagging {
    /// Tags that must all be present.
    #[serde(default)]
    pub contains_all_of: Vec<String>,
    /// Tags of which one must be present.
    #[serde(default)]
    pub contains_one_of: Vec<String>,
}

impl ListFilterTagging {
    /// Returns the tags for a filter kind.
    #[must_use]
    pub fn get(&self, kind: ListFilterType) -> &[String] {
        match kind {
            ListFilterType::ContainsAllOf => &self.contains_all_of,
            ListFilterType::ContainsOneOf => &self.contains_one_of,
        }
    }

    /// Replaces the tags for a filter kind.
    pub fn set(&mut self, kind: ListFilterType, tags: Vec<String>) {
        match kind {
            ListFilterType::ContainsAllOf => self.contains_all_of = tags,
            ListFilterType::ContainsOneOf => self.contains_one_of = tags,
        }
    }
}

/// Time window of a list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimeContext {
    /// No time restriction.
    #[default]
    AllTime,
    /// A single day.
    Exact {
        /// Day to match.
        date: NaiveDate,
    },
    /// An inclusive day range.
    Range {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
}

/// Text match kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextType {
    /// Substring match.
    Contains,
    /// Exact match.
    Equals,
}

/// Text filter applied to property values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFilter {
    /// Match kind.
    #[serde(rename = "type")]
    pub kind: TextType,
    /// Text to match.
    pub sub_str: String,
}

/// Filter part of a list query.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    /// Tag filters.
    #[serde(default)]
    pub tagging: ListFilterTagging,
    /// Entity schemas to include.
    #[serde(default)]
    pub include_types: Vec<EntityConfigId>,
    /// Include entities without tags.
    #[serde(default = "default_true")]
    pub include_untagged: bool,
    /// Include all entity schemas.
    #[serde(default = "default_true")]
    pub include_all: bool,
    /// Include all tagged entities.
    #[serde(default = "default_true")]
    pub include_all_tagging: bool,
    /// Time window.
    #[serde(default)]
    pub time: TimeContext,
    /// Text filters.
    #[serde(default)]
    pub text: Vec<TextFilter>,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            tagging: ListFilterTagging::default(),
            include_types: Vec::new(),
            include_untagged: true,
            include_all: true,
            include_all_tagging: true,
            time: TimeContext::AllTime,
            text: Vec::new(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListSortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

/// Sort key: a native entity field or a property schema id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListSortProperty {
    /// Native entity field.
    Native(ListSortNativeProperty),
    /// Property schema id.
    Property(i64),
}

/// Native sortable entity fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListSortNativeProperty {
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
}

/// Sort part of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSort {
    /// Sort key.
    pub property: ListSortProperty,
    /// Sort direction.
    #[serde(default)]
    pub direction: ListSortDirection,
}

impl Default for ListSort {
    fn default() -> Self {
        Self {
            property: ListSortProperty::Native(ListSortNativeProperty::CreatedAt),
            direction: ListSortDirection::Desc,
        }
    }
}

/// Position of context entries relative to a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListContextType {
    /// Entries before.
    #[default]
    Before,
    /// Entries after.
    After,
    /// Entries on both sides.
    BeforeAndAfter,
}

/// Time unit of a list context window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum ListContextUnit {
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

/// Context window shown around list entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContext {
    /// Window position.
    #[serde(rename = "type")]
    pub kind: ListContextType,
    /// Window length in units.
    pub quantity: u32,
    /// Window unit.
    pub unit: ListContextUnit,
}

impl Default for ListContext {
    fn default() -> Self {
        Self {
            kind: ListContextType::Before,
            quantity: 1,
            unit: ListContextUnit::Day,
        }
    }
}

/// Value of a single display setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean setting.
    Bool(bool),
    /// Integer setting.
    Int(i64),
    /// Text setting.
    Text(String),
}

/// Named display setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Setting name.
    pub name: String,
    /// Setting value.
    pub value: SettingValue,
}

/// Display settings of a list configuration.
pub type Settings = BTreeMap<String, SettingValue>;

/// A named, persisted bundle of filter, sort, settings and themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    /// Owning user.
    #[serde(default)]
    pub user_id: String,
    /// Identity.
    pub id: ListConfigId,
    /// Display name.
    pub name: String,
    /// Filter.
    #[serde(default)]
    pub filter: ListFilter,
    /// Sort.
    #[serde(default)]
    pub sort: ListSort,
    /// Display settings.
    #[serde(default)]
    pub setting: Settings,
    /// Active theme names.
    #[serde(default)]
    pub themes: Vec<String>,
}

impl ListConfig {
    /// Id of the fallback configuration.
    pub const DEFAULT_ID: &'static str = "default";

    /// Creates a configuration with default query shape.
    #[must_use]
    pub fn new(id: impl Into<ListConfigId>, name: impl Into<String>) -> Self {
        Self {
            user_id: String::new(),
            id: id.into(),
            name: name.into(),
            filter: ListFilter::default(),
            sort: ListSort::default(),
            setting: Settings::new(),
            themes: Vec::new(),
        }
    }

    /// Returns the tags this configuration requires on every entity.
    #[must_use]
    pub fn required_tags(&self) -> &[String] {
        self.filter.tagging.get(ListFilterType::ContainsAllOf)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ID, "Default")
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_includes_everything() {
        let filter = ListFilter::default();
        assert!(filter.include_all);
        assert!(filter.include_untagged);
        assert!(filter.include_all_tagging);
        assert_eq!(filter.time, TimeContext::AllTime);
    }

    #[test]
    fn test_list_config_wire_shape() {
        let json = r#"{
            "userId": "u1",
            "id": "abc",
            "name": "Reading",
            "filter": {
                "tagging": {"containsAllOf": ["book"], "containsOneOf": []},
                "time": {"type": "range", "start": "2024-01-01", "end": "2024-01-31"}
            },
            "sort": {"property": "updatedAt", "direction": "asc"},
            "setting": {"pageSize": 25, "showTags": true},
            "themes": ["forest"]
        }"#;

        let config: ListConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.required_tags(), ["book".to_string()]);
        assert!(config.filter.include_all);
        assert!(matches!(config.filter.time, TimeContext::Range { .. }));
        assert_eq!(
            config.sort.property,
            ListSortProperty::Native(ListSortNativeProperty::UpdatedAt)
        );
        assert_eq!(config.setting.get("pageSize"), Some(&SettingValue::Int(25)));
        assert_eq!(config.themes, vec!["forest".to_string()]);
    }

    #[test]
    fn test_sort_by_property_id() {
        let sort: ListSort = serde_json::from_str(r#"{"property": 12, "direction": "desc"}"#).unwrap();
        assert_eq!(sort.property, ListSortProperty::Property(12));
    }

    #[test]
    fn test_tagging_accessors() {
        let mut tagging = ListFilterTagging::default();
        tagging.set(ListFilterType::ContainsOneOf, vec!["x".to_string()]);
        assert!(tagging.get(ListFilterType::ContainsAllOf).is_empty());
        assert_eq!(tagging.get(ListFilterType::ContainsOneOf), ["x".to_string()]);
    }
}

//! Entity schemas and entity instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity schema.
pub type EntityConfigId = i64;

/// Unique identifier for a property schema within an entity schema.
pub type PropertyConfigId = i64;

/// Unique identifier for an entity instance.
pub type EntityId = i64;

/// Declared data type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Single-line text.
    #[default]
    ShortText,
    /// Multi-line text stored as lightweight markup.
    LongText,
    /// Integer number.
    Int,
    /// Boolean flag.
    Boolean,
    /// Date or date-time.
    Date,
    /// Image reference.
    Image,
}

impl DataType {
    /// Returns the lowercase snake-case tag.
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::Int => "int",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Image => "image",
        }
    }

    /// Returns the suffix of the `property-<type>` class name.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::ShortText => "shorttext",
            Self::LongText => "longtext",
            Self::Int => "int",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Image reference stored in an `IMAGE` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageValue {
    /// Image source URL.
    pub src: String,
    /// Alternative text.
    #[serde(default)]
    pub alt: String,
}

/// Stored value of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Text value (also used for dates and markup).
    Text(String),
    /// Image reference.
    Image(ImageValue),
}

impl Default for PropertyValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Image(image) => f.write_str(&image.src),
        }
    }
}

/// Schema of a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPropertyConfig {
    /// Property schema id.
    pub id: PropertyConfigId,
    /// Owning entity schema id.
    #[serde(default)]
    pub entity_config_id: EntityConfigId,
    /// Display name.
    pub name: String,
    /// Declared data type.
    pub data_type: DataType,
    /// Hidden properties never render.
    #[serde(default)]
    pub hidden: bool,
    /// Value used when creating new entities.
    #[serde(default)]
    pub default_value: PropertyValue,
    /// Decoration rendered before the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Decoration rendered after the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl EntityPropertyConfig {
    /// Creates a visible property schema without decoration.
    #[must_use]
    pub fn new(id: PropertyConfigId, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id,
            entity_config_id: 0,
            name: name.into(),
            data_type,
            hidden: false,
            default_value: PropertyValue::default(),
            prefix: None,
            suffix: None,
        }
    }

    /// Marks the property as hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Sets prefix and suffix decoration.
    #[must_use]
    pub fn with_affixes(mut self, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self.suffix = suffix.map(str::to_string);
        self
    }
}

/// Type schema owning an ordered set of property schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    /// Schema id.
    pub id: EntityConfigId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Ordered property schemas.
    #[serde(default)]
    pub properties: Vec<EntityPropertyConfig>,
}

impl EntityConfig {
    /// Resolves a property schema by id.
    #[must_use]
    pub fn property_config(&self, id: PropertyConfigId) -> Option<&EntityPropertyConfig> {
        self.properties.iter().find(|config| config.id == id)
    }
}

/// Property value attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProperty {
    /// Property instance id.
    pub id: i64,
    /// Referenced property schema.
    pub property_config_id: PropertyConfigId,
    /// Stored value.
    pub value: PropertyValue,
}

impl EntityProperty {
    /// Creates a property instance.
    #[must_use]
    pub fn new(id: i64, property_config_id: PropertyConfigId, value: PropertyValue) -> Self {
        Self {
            id,
            property_config_id,
            value,
        }
    }
}

/// An entity instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Entity id.
    pub id: EntityId,
    /// Schema id.
    #[serde(rename = "type")]
    pub entity_config_id: EntityConfigId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Tags attached to the entity.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered property instances.
    #[serde(default)]
    pub properties: Vec<EntityProperty>,
}

//! Display model for entity properties.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::trace;

use crate::domain::entities::{
    DataType, Entity, EntityConfig, EntityId, EntityProperty, EntityPropertyConfig, PropertyValue,
};
use crate::domain::ports::DateTimeFormatPort;

use super::markup;
use super::sanitizer::SanitizedHtml;

/// Rendered value of a non-image property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DisplayValue {
    /// Plain text shown as is.
    Text(String),
    /// Integer shown unchanged.
    Number(i64),
    /// Expanded and sanitized markup.
    Html(SanitizedHtml),
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Html(html) => write!(f, "{html}"),
        }
    }
}

/// Key/value row for a non-image property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRow {
    pub name: String,
    pub data_type: DataType,
    pub value: DisplayValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl PropertyRow {
    /// Class names: `property`, `property-<type>` and `property--<name>`.
    #[must_use]
    pub fn class_names(&self) -> Vec<String> {
        vec![
            "property".to_string(),
            format!("property-{}", self.data_type.class_name()),
            format!("property--{}", self.name.to_lowercase()),
        ]
    }

    /// Value wrapped in its prefix and suffix.
    #[must_use]
    pub fn decorated_value(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix.as_deref().unwrap_or_default(),
            self.value,
            self.suffix.as_deref().unwrap_or_default()
        )
    }
}

/// Output of rendering one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderedProperty {
    /// Decorated key/value row.
    Row(PropertyRow),
    /// Image reference, never decorated.
    Image {
        /// Image source.
        src: String,
        /// Alternative text.
        alt: String,
    },
}

/// Display model of a whole entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityView {
    pub id: EntityId,
    pub tags: Vec<String>,
    pub properties: Vec<RenderedProperty>,
    pub created_at: String,
    /// Present only when it differs from the creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Maps stored property values to display values by declared data type.
#[derive(Clone)]
pub struct PropertyRenderer {
    formatter: Arc<dyn DateTimeFormatPort>,
}

impl PropertyRenderer {
    #[must_use]
    pub fn new(formatter: Arc<dyn DateTimeFormatPort>) -> Self {
        Self { formatter }
    }

    /// Renders one property of an entity with the given schema.
    ///
    /// Returns `None` when the property schema is unknown or hidden, or when
    /// an image schema holds a non-image value.
    #[must_use]
    pub fn render(
        &self,
        property: &EntityProperty,
        schema: &EntityConfig,
    ) -> Option<RenderedProperty> {
        let Some(config) = schema.property_config(property.property_config_id) else {
            trace!(
                property_config_id = property.property_config_id,
                "Skipping property without schema"
            );
            return None;
        };
        if config.hidden {
            return None;
        }

        let value = match config.data_type {
            DataType::Date => DisplayValue::Text(self.format_date(&property.value)),
            DataType::Int => match &property.value {
                PropertyValue::Int(number) => DisplayValue::Number(*number),
                other => DisplayValue::Text(other.to_string()),
            },
            DataType::LongText => DisplayValue::Html(markup::render(&property.value.to_string())),
            DataType::Image => return Self::render_image(&property.value),
            DataType::ShortText | DataType::Boolean => DisplayValue::Text(property.value.to_string()),
        };

        Some(RenderedProperty::Row(Self::row(config, value)))
    }

    /// Renders every visible property plus readable timestamps.
    #[must_use]
    pub fn render_entity(&self, entity: &Entity, schemas: &[EntityConfig]) -> EntityView {
        let properties = schemas
            .iter()
            .find(|schema| schema.id == entity.entity_config_id)
            .map(|schema| {
                entity
                    .properties
                    .iter()
                    .filter_map(|property| self.render(property, schema))
                    .collect()
            })
            .unwrap_or_default();

        let created_at = self.formatter.format_date_time(&entity.created_at);
        let updated_at = self.formatter.format_date_time(&entity.updated_at);

        EntityView {
            id: entity.id,
            tags: entity.tags.clone(),
            properties,
            updated_at: (updated_at != created_at).then_some(updated_at),
            created_at,
        }
    }

    fn row(config: &EntityPropertyConfig, value: DisplayValue) -> PropertyRow {
        PropertyRow {
            name: config.name.clone(),
            data_type: config.data_type,
            value,
            prefix: config.prefix.clone().filter(|p| !p.is_empty()),
            suffix: config.suffix.clone().filter(|s| !s.is_empty()),
        }
    }

    fn render_image(value: &PropertyValue) -> Option<RenderedProperty> {
        match value {
            PropertyValue::Image(image) => Some(RenderedProperty::Image {
                src: image.src.clone(),
                alt: image.alt.clone(),
            }),
            _ => None,
        }
    }

    /// Formats a stored date, falling back to the raw text when it does not parse.
    fn format_date(&self, value: &PropertyValue) -> String {
        let PropertyValue::Text(raw) = value else {
            return value.to_string();
        };

        parse_date(raw).map_or_else(
            || raw.clone(),
            |timestamp| self.formatter.format_date_time(&timestamp),
        )
    }
}

impl std::fmt::Debug for PropertyRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyRenderer").finish_non_exhaustive()
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

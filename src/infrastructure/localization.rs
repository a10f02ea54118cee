//! Built-in English strings with user overrides.

use std::collections::HashMap;

use crate::domain::ports::LocalizationPort;

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("listConfigSaved", "List configuration saved"),
    ("configAdded", "List configuration added"),
    ("configDeleted", "List configuration deleted"),
    ("themesSaved", "Themes saved"),
    ("failedToSaveListConfig", "Failed to save list configuration"),
    ("failedToAddListConfig", "Failed to add list configuration"),
    ("failedToDeleteListConfig", "Failed to delete list configuration"),
    ("failedToLoadListConfigs", "Failed to load list configurations"),
    ("failedToSaveThemes", "Failed to save themes"),
    ("confirmDelete", "Delete this list configuration?"),
    ("createdAt", "Created"),
    ("updatedAt", "Updated"),
];

/// String catalog resolving message keys.
#[derive(Debug, Clone)]
pub struct StringCatalog {
    strings: HashMap<String, String>,
}

impl StringCatalog {
    /// Creates the English catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strings: DEFAULT_STRINGS
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    /// Replaces or adds strings, typically from the `[strings]` config table.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        self.strings
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

impl Default for StringCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalizationPort for StringCatalog {
    fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

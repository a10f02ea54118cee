//! File-backed list configuration storage.
//!
//! All configurations and the active id live in a single `lists.toml`.
//! Every write reloads the document, applies the change and replaces the
//! file atomically, so a crash never leaves a half-written store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{ListConfig, ListConfigId, ListFilter, ListSort};
use crate::domain::errors::StorageError;
use crate::domain::ports::ListConfigStoragePort;
use crate::infrastructure::config::storage::write_atomic;

const STORE_FILE_NAME: &str = "lists.toml";
const NEW_CONFIG_NAME: &str = "New list";

#[derive(Debug, Default, Serialize, Deserialize)]
struct ListStoreDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_list_config_id: Option<ListConfigId>,
    #[serde(default)]
    list_configs: Vec<ListConfig>,
}

impl ListStoreDocument {
    fn find_mut(&mut self, id: &str) -> Result<&mut ListConfig, StorageError> {
        self.list_configs
            .iter_mut()
            .find(|config| config.id == id)
            .ok_or_else(|| StorageError::not_found(id))
    }
}

/// List configuration storage backed by a TOML file.
pub struct TomlListConfigStorage {
    path: PathBuf,
    user_id: String,
    write_lock: Mutex<()>,
}

impl TomlListConfigStorage {
    /// Creates storage keeping `lists.toml` inside `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path, user_id: impl Into<String>) -> Self {
        Self::with_path(data_dir.join(STORE_FILE_NAME), user_id)
    }

    /// Creates storage backed by an explicit file.
    #[must_use]
    pub fn with_path(path: PathBuf, user_id: impl Into<String>) -> Self {
        Self {
            path,
            user_id: user_id.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the store file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ListStoreDocument, StorageError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(ListStoreDocument::default());
        }
        let content = tokio::fs::read_to_string(&self.path).await?;
        toml::from_str(&content).map_err(|e| {
            warn!(path = ?self.path, error = %e, "List store is malformed");
            StorageError::from(e)
        })
    }

    async fn store(&self, document: &ListStoreDocument) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(document)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &content))
            .await
            .map_err(|e| StorageError::unavailable(e.to_string()))??;
        Ok(())
    }

    async fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut ListStoreDocument) -> Result<(), StorageError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        change(&mut document)?;
        self.store(&document).await
    }
}

#[async_trait]
impl ListConfigStoragePort for TomlListConfigStorage {
    async fn get_list_configs(&self) -> Result<Vec<ListConfig>, StorageError> {
        let document = self.load().await?;
        debug!(count = document.list_configs.len(), "Loaded list configurations");
        Ok(document.list_configs)
    }

    async fn add_list_config(&self) -> Result<ListConfigId, StorageError> {
        let id = Uuid::new_v4().to_string();
        let mut config = ListConfig::new(id.clone(), NEW_CONFIG_NAME);
        config.user_id.clone_from(&self.user_id);

        self.update(move |document| {
            document.list_configs.push(config);
            Ok(())
        })
        .await?;

        debug!(id = %id, "Added list configuration");
        Ok(id)
    }

    async fn save_list_config(&self, config: &ListConfig) -> Result<(), StorageError> {
        let config = config.clone();
        let id = config.id.clone();
        self.update(|document| {
            let slot = document.find_mut(&id)?;
            *slot = config;
            Ok(())
        })
        .await?;

        debug!(id = %id, "Saved list configuration");
        Ok(())
    }

    async fn delete_list_config(&self, id: &str) -> Result<(), StorageError> {
        self.update(|document| {
            let before = document.list_configs.len();
            document.list_configs.retain(|config| config.id != id);
            if document.list_configs.len() == before {
                return Err(StorageError::not_found(id));
            }
            if document.active_list_config_id.as_deref() == Some(id) {
                document.active_list_config_id = None;
            }
            Ok(())
        })
        .await?;

        debug!(id = %id, "Deleted list configuration");
        Ok(())
    }

    async fn get_active_list_config_id(&self) -> Result<Option<ListConfigId>, StorageError> {
        Ok(self.load().await?.active_list_config_id)
    }

    async fn save_active_list_config_id(&self, id: &str) -> Result<(), StorageError> {
        self.update(|document| {
            document.active_list_config_id = Some(id.to_string());
            Ok(())
        })
        .await
    }

    async fn update_list_filter(&self, id: &str, filter: &ListFilter) -> Result<(), StorageError> {
        self.update(|document| {
            document.find_mut(id)?.filter = filter.clone();
            Ok(())
        })
        .await
    }

    async fn update_list_sort(&self, id: &str, sort: &ListSort) -> Result<(), StorageError> {
        self.update(|document| {
            document.find_mut(id)?.sort = sort.clone();
            Ok(())
        })
        .await
    }

    async fn update_list_themes(&self, id: &str, themes: &[String]) -> Result<(), StorageError> {
        self.update(|document| {
            document.find_mut(id)?.themes = themes.to_vec();
            Ok(())
        })
        .await
    }
}

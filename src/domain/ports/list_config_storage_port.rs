//! List configuration storage port definition.

use async_trait::async_trait;

use crate::domain::entities::{ListConfig, ListConfigId, ListFilter, ListSort};
use crate::domain::errors::StorageError;

/// Port for list configuration persistence.
#[async_trait]
pub trait ListConfigStoragePort: Send + Sync {
    /// Fetches the full, ordered configuration collection.
    async fn get_list_configs(&self) -> Result<Vec<ListConfig>, StorageError>;

    /// Creates a new configuration with default query shape and returns its id.
    async fn add_list_config(&self) -> Result<ListConfigId, StorageError>;

    /// Persists a configuration, replacing the stored entry with the same id.
    async fn save_list_config(&self, config: &ListConfig) -> Result<(), StorageError>;

    /// Deletes a configuration.
    async fn delete_list_config(&self, id: &str) -> Result<(), StorageError>;

    /// Returns the persisted active configuration id, if any.
    async fn get_active_list_config_id(&self) -> Result<Option<ListConfigId>, StorageError>;

    /// Persists the active configuration id.
    async fn save_active_list_config_id(&self, id: &str) -> Result<(), StorageError>;

    /// Writes a filter through to a stored configuration.
    async fn update_list_filter(&self, id: &str, filter: &ListFilter) -> Result<(), StorageError>;

    /// Writes a sort through to a stored configuration.
    async fn update_list_sort(&self, id: &str, sort: &ListSort) -> Result<(), StorageError>;

    /// Writes themes through to a stored configuration.
    async fn update_list_themes(&self, id: &str, themes: &[String]) -> Result<(), StorageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// In-memory storage with failure switches and call counters.
    #[derive(Default)]
    pub struct MockListConfigStorage {
        configs: Mutex<Vec<ListConfig>>,
        active_id: Mutex<Option<ListConfigId>>,
        next_id: AtomicUsize,
        pub save_calls: AtomicUsize,
        pub delete_calls: AtomicUsize,
        pub add_calls: AtomicUsize,
        pub fetch_calls: AtomicUsize,
        pub filter_writes: AtomicUsize,
        pub sort_writes: AtomicUsize,
        pub theme_writes: AtomicUsize,
        fail_saves: AtomicBool,
        fail_deletes: AtomicBool,
        fail_adds: AtomicBool,
        fail_fetches: AtomicBool,
        hold_saves: AtomicBool,
        release: Notify,
    }

    impl MockListConfigStorage {
        /// Creates empty storage.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates storage holding the given configurations.
        pub fn with_configs(configs: Vec<ListConfig>) -> Self {
            let storage = Self::new();
            *storage.configs.lock() = configs;
            storage
        }

        pub fn set_active_id(&self, id: Option<&str>) {
            *self.active_id.lock() = id.map(str::to_string);
        }

        pub fn active_id(&self) -> Option<ListConfigId> {
            self.active_id.lock().clone()
        }

        pub fn configs(&self) -> Vec<ListConfig> {
            self.configs.lock().clone()
        }

        pub fn set_fail_saves(&self, value: bool) {
            self.fail_saves.store(value, Ordering::SeqCst);
        }

        pub fn set_fail_deletes(&self, value: bool) {
            self.fail_deletes.store(value, Ordering::SeqCst);
        }

        pub fn set_fail_adds(&self, value: bool) {
            self.fail_adds.store(value, Ordering::SeqCst);
        }

        pub fn set_fail_fetches(&self, value: bool) {
            self.fail_fetches.store(value, Ordering::SeqCst);
        }

        /// Makes saves wait until [`Self::release_save`] is called.
        pub fn hold_saves(&self) {
            self.hold_saves.store(true, Ordering::SeqCst);
        }

        pub fn release_save(&self) {
            self.release.notify_one();
        }

        pub fn saves(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ListConfigStoragePort for MockListConfigStorage {
        async fn get_list_configs(&self) -> Result<Vec<ListConfig>, StorageError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetches.load(Ordering::SeqCst) {
                return Err(StorageError::unavailable("mock fetch failure"));
            }
            Ok(self.configs.lock().clone())
        }

        async fn add_list_config(&self) -> Result<ListConfigId, StorageError> {
            self.add_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_adds.load(Ordering::SeqCst) {
                return Err(StorageError::rejected("mock add failure"));
            }
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let id = format!("new-{n}");
            self.configs
                .lock()
                .push(ListConfig::new(id.clone(), format!("New {n}")));
            Ok(id)
        }

        async fn save_list_config(&self, config: &ListConfig) -> Result<(), StorageError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            if self.hold_saves.load(Ordering::SeqCst) {
                self.release.notified().await;
            }
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::rejected("mock save failure"));
            }
            let mut configs = self.configs.lock();
            match configs.iter_mut().find(|c| c.id == config.id) {
                Some(existing) => *existing = config.clone(),
                None => return Err(StorageError::not_found(config.id.clone())),
            }
            Ok(())
        }

        async fn delete_list_config(&self, id: &str) -> Result<(), StorageError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(StorageError::rejected("mock delete failure"));
            }
            let mut configs = self.configs.lock();
            let before = configs.len();
            configs.retain(|c| c.id != id);
            if configs.len() == before {
                return Err(StorageError::not_found(id));
            }
            Ok(())
        }

        async fn get_active_list_config_id(&self) -> Result<Option<ListConfigId>, StorageError> {
            Ok(self.active_id.lock().clone())
        }

        async fn save_active_list_config_id(&self, id: &str) -> Result<(), StorageError> {
            *self.active_id.lock() = Some(id.to_string());
            Ok(())
        }

        async fn update_list_filter(
            &self,
            id: &str,
            filter: &ListFilter,
        ) -> Result<(), StorageError> {
            self.filter_writes.fetch_add(1, Ordering::SeqCst);
            let mut configs = self.configs.lock();
            let config = configs
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StorageError::not_found(id))?;
            config.filter = filter.clone();
            Ok(())
        }

        async fn update_list_sort(&self, id: &str, sort: &ListSort) -> Result<(), StorageError> {
            self.sort_writes.fetch_add(1, Ordering::SeqCst);
            let mut configs = self.configs.lock();
            let config = configs
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StorageError::not_found(id))?;
            config.sort = sort.clone();
            Ok(())
        }

        async fn update_list_themes(
            &self,
            id: &str,
            themes: &[String],
        ) -> Result<(), StorageError> {
            self.theme_writes.fetch_add(1, Ordering::SeqCst);
            let mut configs = self.configs.lock();
            let config = configs
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StorageError::not_found(id))?;
            config.themes = themes.to_vec();
            Ok(())
        }
    }
}

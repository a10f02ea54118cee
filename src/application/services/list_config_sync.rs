//! Keeps the persisted list configurations and the store in step.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::application::store::{StoreAction, StoreHandle};
use crate::domain::entities::{ListConfig, ListConfigId};
use crate::domain::ports::{ListConfigStoragePort, LocalizationPort, NotificationPort};
use crate::domain::{NotificationLevel, UiEvent};

/// Result of [`ListConfigSynchronizer::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The configuration was written and the collection refetched.
    Saved,
    /// The name buffer already matches the stored name.
    AlreadyInSync,
    /// Another save is running; this call was dropped.
    InFlight,
    /// Storage reported a failure. The buffer is unchanged.
    Failed,
}

/// Result of [`ListConfigSynchronizer::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The configuration was deleted. Carries the newly active id, if any.
    Deleted {
        /// Active configuration after the refetch.
        active: Option<ListConfigId>,
    },
    /// No configuration is loaded in the buffer.
    NoActiveConfig,
    /// Storage reported a failure.
    Failed,
}

/// Result of [`ListConfigSynchronizer::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The configuration was created and selected.
    Added(ListConfigId),
    /// The configuration was created but the collection could not be
    /// refetched, so nothing was selected.
    Unsynced(ListConfigId),
    /// Storage reported a failure.
    Failed,
}

/// Result of [`ListConfigSynchronizer::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The configuration became active.
    Selected,
    /// The id is not part of the collection.
    Unknown,
}

/// Result of [`ListConfigSynchronizer::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection was fetched.
    Loaded {
        /// Active configuration after loading.
        active: Option<ListConfigId>,
    },
    /// Storage reported a failure.
    Failed,
}

/// Result of write-through operations on the active configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was persisted.
    Written,
    /// No configuration is active.
    NoActiveConfig,
    /// Storage reported a failure.
    Failed,
}

#[derive(Debug, Default, Clone)]
struct NameBuffer {
    id: Option<ListConfigId>,
    name: String,
}

/// Clears the in-flight flag when a save finishes or is dropped.
struct SaveGuard<'a>(&'a AtomicBool);

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates list configuration edits between the store and storage.
///
/// Holds a local name buffer separate from the stored name so the panel can
/// edit without touching the store until a save succeeds. Every operation
/// reports an explicit outcome and never returns an error.
pub struct ListConfigSynchronizer {
    storage: Arc<dyn ListConfigStoragePort>,
    notifier: Arc<dyn NotificationPort>,
    strings: Arc<dyn LocalizationPort>,
    store: StoreHandle,
    events: mpsc::UnboundedSender<UiEvent>,
    buffer: Mutex<NameBuffer>,
    saving: AtomicBool,
}

impl ListConfigSynchronizer {
    /// Creates a synchronizer over the shared store.
    #[must_use]
    pub fn new(
        storage: Arc<dyn ListConfigStoragePort>,
        notifier: Arc<dyn NotificationPort>,
        strings: Arc<dyn LocalizationPort>,
        store: StoreHandle,
        events: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            storage,
            notifier,
            strings,
            store,
            events,
            buffer: Mutex::new(NameBuffer::default()),
            saving: AtomicBool::new(false),
        }
    }

    /// Fetches the collection and activates the persisted or first config.
    pub async fn load(&self) -> LoadOutcome {
        if !self.refetch().await {
            return LoadOutcome::Failed;
        }

        let persisted = match self.storage.get_active_list_config_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to read active list config id");
                None
            }
        };

        let active = self.store.select(|store| {
            persisted
                .filter(|id| store.list_config_position(id).is_some())
                .or_else(|| store.list_configs().first().map(|config| config.id.clone()))
        });

        if let Some(id) = &active {
            self.store.dispatch(StoreAction::SelectListConfig(id.clone()));
        }
        self.sync();

        info!(active = ?active, "List configs loaded");
        LoadOutcome::Loaded { active }
    }

    /// Creates a first configuration when the fetched collection is empty.
    pub async fn setup(&self) -> Option<AddOutcome> {
        let needs_config = self
            .store
            .select(|store| store.has_fetched_list_configs() && store.list_configs().is_empty());

        let outcome = if needs_config {
            debug!("No list configs stored, creating one");
            Some(self.add().await)
        } else {
            None
        };

        self.sync();
        outcome
    }

    /// Copies the active configuration's id and name into the buffer.
    pub fn sync(&self) {
        let active = self
            .store
            .select(|store| store.list_config().map(|c| (c.id.clone(), c.name.clone())));

        if let Some((id, name)) = active {
            let mut buffer = self.buffer.lock();
            buffer.id = Some(id);
            buffer.name = name;
        }
    }

    /// Replaces the buffered name.
    pub fn rename(&self, name: impl Into<String>) {
        self.buffer.lock().name = name.into();
    }

    /// Name currently held in the buffer.
    #[must_use]
    pub fn buffered_name(&self) -> String {
        self.buffer.lock().name.clone()
    }

    /// Returns true when the buffer matches the stored name or nothing is active.
    #[must_use]
    pub fn in_sync(&self) -> bool {
        let buffered = self.buffer.lock().name.clone();
        self.store.select(|store| {
            store
                .list_config()
                .is_none_or(|config| config.name == buffered)
        })
    }

    /// Returns true while a save is running.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Persists the buffered name together with the current query shape.
    pub async fn save(&self) -> SaveOutcome {
        if self.in_sync() {
            return SaveOutcome::AlreadyInSync;
        }

        if self
            .saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Save already in flight, dropping request");
            return SaveOutcome::InFlight;
        }
        let _guard = SaveGuard(&self.saving);

        let buffer = self.buffer.lock().clone();
        let Some(config) = self.store.select(|store| {
            let active = store.list_config()?;
            Some(ListConfig {
                user_id: active.user_id.clone(),
                id: buffer.id.clone().unwrap_or_else(|| active.id.clone()),
                name: buffer.name.clone(),
                filter: store.list_filter().clone(),
                sort: store.list_sort().clone(),
                setting: store.list_setting().clone(),
                themes: active.themes.clone(),
            })
        }) else {
            return SaveOutcome::AlreadyInSync;
        };

        debug!(id = %config.id, name = %config.name, "Saving list config");

        if let Err(e) = self.storage.save_list_config(&config).await {
            error!(id = %config.id, error = %e, "Failed to save list config");
            self.notify("failedToSaveListConfig", NotificationLevel::Error);
            return SaveOutcome::Failed;
        }

        self.notify("listConfigSaved", NotificationLevel::Success);
        if !self.refetch().await {
            let saved = config.clone();
            self.patch_local(move |configs| {
                if let Some(slot) = configs.iter_mut().find(|c| c.id == saved.id) {
                    *slot = saved;
                }
            });
        }
        info!(id = %config.id, "List config saved");
        SaveOutcome::Saved
    }

    /// Deletes the buffered configuration and activates the first remaining one.
    pub async fn delete(&self) -> DeleteOutcome {
        let Some(id) = self.buffer.lock().id.clone() else {
            return DeleteOutcome::NoActiveConfig;
        };

        if let Err(e) = self.storage.delete_list_config(&id).await {
            error!(id = %id, error = %e, "Failed to delete list config");
            self.notify("failedToDeleteListConfig", NotificationLevel::Error);
            return DeleteOutcome::Failed;
        }

        self.notify("configDeleted", NotificationLevel::Info);
        if !self.refetch().await {
            self.patch_local(|configs| configs.retain(|config| config.id != id));
        }

        let first = self
            .store
            .select(|store| store.list_configs().first().map(|config| config.id.clone()));

        match &first {
            Some(next) => {
                self.select(next).await;
            }
            None => {
                self.store.dispatch(StoreAction::ClearListConfig);
                *self.buffer.lock() = NameBuffer::default();
            }
        }

        info!(deleted = %id, active = ?first, "List config deleted");
        DeleteOutcome::Deleted { active: first }
    }

    /// Creates a configuration and selects it.
    pub async fn add(&self) -> AddOutcome {
        let id = match self.storage.add_list_config().await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to add list config");
                self.notify("failedToAddListConfig", NotificationLevel::Error);
                return AddOutcome::Failed;
            }
        };

        self.notify("configAdded", NotificationLevel::Success);
        if !self.refetch().await || self.select(&id).await == SelectOutcome::Unknown {
            warn!(id = %id, "Added list config is not in the local collection");
            return AddOutcome::Unsynced(id);
        }

        info!(id = %id, "List config added");
        AddOutcome::Added(id)
    }

    /// Makes a configuration active and persists the choice.
    pub async fn select(&self, id: &str) -> SelectOutcome {
        if self
            .store
            .select(|store| store.list_config_position(id))
            .is_none()
        {
            debug!(id, "Ignoring selection of unknown list config");
            return SelectOutcome::Unknown;
        }

        if let Err(e) = self.storage.save_active_list_config_id(id).await {
            warn!(id, error = %e, "Failed to persist active list config id");
        }

        self.store
            .dispatch(StoreAction::SelectListConfig(id.to_string()));
        self.sync();
        self.emit(UiEvent::ConfigChanged { id: id.to_string() });
        SelectOutcome::Selected
    }

    /// Writes the store's filter through and requests a reload.
    pub async fn filter_updated(&self) -> WriteOutcome {
        let target = self
            .store
            .select(|store| Some((store.list_config_id()?.to_string(), store.list_filter().clone())));

        let outcome = match target {
            Some((id, filter)) => match self.storage.update_list_filter(&id, &filter).await {
                Ok(()) => WriteOutcome::Written,
                Err(e) => {
                    warn!(id = %id, error = %e, "Failed to write list filter");
                    WriteOutcome::Failed
                }
            },
            None => WriteOutcome::NoActiveConfig,
        };

        self.emit(UiEvent::ListReload);
        outcome
    }

    /// Writes the store's sort through and requests a local resync.
    pub async fn sort_updated(&self) -> WriteOutcome {
        let target = self
            .store
            .select(|store| Some((store.list_config_id()?.to_string(), store.list_sort().clone())));

        let outcome = match target {
            Some((id, sort)) => match self.storage.update_list_sort(&id, &sort).await {
                Ok(()) => WriteOutcome::Written,
                Err(e) => {
                    warn!(id = %id, error = %e, "Failed to write list sort");
                    WriteOutcome::Failed
                }
            },
            None => WriteOutcome::NoActiveConfig,
        };

        self.emit(UiEvent::ListResync);
        outcome
    }

    /// Requests a reload after a display setting changed.
    pub fn setting_updated(&self) {
        self.emit(UiEvent::ListReload);
    }

    /// Replaces the active configuration's themes locally.
    pub fn update_themes(&self, themes: Vec<String>) {
        self.store.dispatch(StoreAction::SetThemes(themes.clone()));
        self.emit(UiEvent::ThemesUpdated { themes });
    }

    /// Persists themes for the active configuration.
    pub async fn save_themes(&self, themes: Vec<String>) -> WriteOutcome {
        let Some(id) = self
            .store
            .select(|store| store.list_config().map(|config| config.id.clone()))
        else {
            return WriteOutcome::NoActiveConfig;
        };

        if let Err(e) = self.storage.update_list_themes(&id, &themes).await {
            error!(id = %id, error = %e, "Failed to save themes");
            self.notify("failedToSaveThemes", NotificationLevel::Error);
            return WriteOutcome::Failed;
        }

        self.notify("themesSaved", NotificationLevel::Success);
        self.emit(UiEvent::ThemesSaved { themes });
        WriteOutcome::Written
    }

    /// Replaces the store's collection with the stored one.
    async fn refetch(&self) -> bool {
        match self.storage.get_list_configs().await {
            Ok(configs) => {
                debug!(count = configs.len(), "Fetched list configs");
                self.store.dispatch(StoreAction::SetListConfigs(configs));
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch list configs");
                self.notify("failedToLoadListConfigs", NotificationLevel::Error);
                false
            }
        }
    }

    /// Applies a persisted change to the store's stale collection after a
    /// refetch failed.
    fn patch_local(&self, patch: impl FnOnce(&mut Vec<ListConfig>)) {
        let mut configs = self.store.select(|store| store.list_configs().to_vec());
        patch(&mut configs);
        self.store.dispatch(StoreAction::SetListConfigs(configs));
    }

    fn notify(&self, key: &str, level: NotificationLevel) {
        self.notifier.notify(&self.strings.translate(key), level);
    }

    fn emit(&self, event: UiEvent) {
        let name = event.name();
        if self.events.send(event).is_err() {
            debug!(event = name, "No listener for UI event");
        }
    }
}

impl std::fmt::Debug for ListConfigSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListConfigSynchronizer")
            .field("buffer", &*self.buffer.lock())
            .field("saving", &self.is_saving())
            .finish_non_exhaustive()
    }
}

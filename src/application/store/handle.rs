use std::sync::Arc;

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use tokio::sync::mpsc;
use tracing::debug;

use super::{AppStore, ChangeKind, StoreAction};

/// Notification sent to subscribers after every committed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    /// Name of the committed action.
    pub action: &'static str,
    /// Part of the store the action touched.
    pub kind: ChangeKind,
    /// Store revision after the action.
    pub revision: u64,
}

/// Shared handle to the single store instance.
///
/// Actions are applied under a write lock, so readers never observe a
/// partially applied action. Subscribers are notified after the lock is
/// released.
#[derive(Clone, Default)]
pub struct StoreHandle {
    inner: Arc<RwLock<AppStore>>,
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<StoreChange>>>>,
}

impl StoreHandle {
    #[must_use]
    pub fn new(store: AppStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Applies an action and returns the new revision.
    pub fn dispatch(&self, action: StoreAction) -> u64 {
        let name = action.name();
        let kind = action.change_kind();

        let revision = {
            let mut store = self.inner.write();
            store.apply(action);
            store.revision()
        };

        debug!(action = name, revision, "Store action applied");

        let change = StoreChange {
            action: name,
            kind,
            revision,
        };
        self.subscribers
            .lock()
            .retain(|subscriber| subscriber.send(change).is_ok());

        revision
    }

    /// Reads a derived value from the current state.
    pub fn select<T>(&self, selector: impl FnOnce(&AppStore) -> T) -> T {
        selector(&self.inner.read())
    }

    /// Locks the store for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, AppStore> {
        self.inner.read()
    }

    /// Registers a subscriber for change records.
    #[must_use]
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        rx
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("revision", &self.inner.read().revision())
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ListConfig;

    #[test]
    fn test_dispatch_notifies_subscribers() {
        let store = StoreHandle::default();
        let mut changes = store.subscribe();

        store.dispatch(StoreAction::SetListConfigs(vec![ListConfig::new("a", "A")]));
        store.dispatch(StoreAction::SelectListConfig("a".to_string()));

        let first = changes.try_recv().unwrap();
        assert_eq!(first.action, "setListConfigs");
        assert_eq!(first.kind, ChangeKind::Configs);
        let second = changes.try_recv().unwrap();
        assert_eq!(second.kind, ChangeKind::ActiveConfig);
        assert_eq!(second.revision, 2);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let store = StoreHandle::default();
        let changes = store.subscribe();
        drop(changes);

        store.dispatch(StoreAction::SetLoading(true));

        assert!(store.subscribers.lock().is_empty());
    }

    #[test]
    fn test_select_reads_committed_state() {
        let store = StoreHandle::default();
        let clone = store.clone();

        clone.dispatch(StoreAction::SetDebugMode(true));

        assert!(store.select(AppStore::debug_mode));
    }
}

//! In-process toast notifications.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::application::services::NotificationManager;
use crate::domain::ports::NotificationPort;
use crate::domain::{Notification, NotificationLevel};

/// Queues notifications as toasts and mirrors them to the log.
#[derive(Debug, Clone, Default)]
pub struct ToastNotifier {
    queue: Arc<Mutex<NotificationManager>>,
}

impl ToastNotifier {
    /// Creates a notifier whose toasts stay visible for `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(NotificationManager::new(duration))),
        }
    }

    /// Advances the toast queue.
    pub fn tick(&self) {
        self.queue.lock().tick();
    }

    /// Returns the visible toast, if any.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.queue.lock().current_notification().cloned()
    }

    /// Removes and returns every queued toast.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain()
    }
}

impl NotificationPort for ToastNotifier {
    fn notify(&self, message: &str, level: NotificationLevel) {
        match level {
            NotificationLevel::Error => error!(%level, text = message, "Notification"),
            NotificationLevel::Warn => warn!(%level, text = message, "Notification"),
            NotificationLevel::Info | NotificationLevel::Success => {
                info!(%level, text = message, "Notification");
            }
        }
        self.queue.lock().notify(level, message);
    }
}

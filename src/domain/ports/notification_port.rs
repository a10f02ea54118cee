use crate::domain::NotificationLevel;

/// Port for user-visible notifications (toasts).
pub trait NotificationPort: Send + Sync {
    /// Shows a localized message with a severity.
    fn notify(&self, message: &str, level: NotificationLevel);
}

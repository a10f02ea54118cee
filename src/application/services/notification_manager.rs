use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// Toast queue. The front notification is the visible one.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    /// Advances the queue, dropping the front notification once it expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Removes and returns every queued notification.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_notification_flow() {
        let mut manager = NotificationManager::default();

        manager.success("Saved");
        assert!(manager.current_notification().is_some());

        manager.tick();
        assert!(manager.current_notification().is_some());
    }

    #[test]
    fn test_expired_front_advances_queue() {
        let mut manager = NotificationManager::default();
        manager.success("First");
        manager.error("Second");

        assert_eq!(manager.current_notification().unwrap().message, "First");

        manager.tick();
        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());
        manager.tick();

        let second = manager.current_notification().unwrap();
        assert_eq!(second.message, "Second");
        assert_eq!(second.level, NotificationLevel::Error);
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut manager = NotificationManager::new(Duration::from_secs(1));
        manager.success("a");
        manager.success("b");

        let drained = manager.drain();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].duration, Duration::from_secs(1));
        assert!(!manager.has_notifications());
    }
}

use crate::notifications::Notification;
use std::time::Instant;

/// How long a toast stays on screen, in seconds.
pub(crate) const TOAST_SECONDS: f32 = 2.8;

pub struct NotificationHandler {
    notifications: Vec<Notification>,
}

impl NotificationHandler {
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
        }
    }

    pub fn show_info(&mut self, title: &str, message: &str) {
        log::info!("{title}: {message}");
        self.notifications.push(Notification {
            title: title.to_string(),
            message: message.to_string(),
            created_at: Instant::now(),
        });
    }

    /// Notifications still within their display time, newest first.
    pub(crate) fn get_recent_notifications(&self) -> Vec<&Notification> {
        let now = Instant::now();
        self.notifications
            .iter()
            .rev()
            .filter(|n| now.duration_since(n.created_at).as_secs_f32() < TOAST_SECONDS)
            .take(5)
            .collect()
    }

    pub fn cleanup_old_notifications(&mut self, max_age_secs: f32) {
        let now = Instant::now();
        self.notifications
            .retain(|n| now.duration_since(n.created_at).as_secs_f32() < max_age_secs);
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

impl Default for NotificationHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_notifications_are_newest_first() {
        let mut handler = NotificationHandler::new();
        handler.show_info("A", "first");
        handler.show_info("B", "second");
        let recent = handler.get_recent_notifications();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "B");
    }

    #[test]
    fn cleanup_drops_expired() {
        let mut handler = NotificationHandler::new();
        handler.show_info("A", "first");
        handler.cleanup_old_notifications(0.0);
        assert_eq!(handler.len(), 0);
    }
}

//! Notification sink for operation outcomes.
//!
//! Messages are short-lived: each one is visible for `ttl` after it was
//! recorded and the log never holds more than `MAX_NOTIFICATIONS` entries.

use crate::models::notification::{Notification, NotificationKind};
use chrono::{DateTime, Duration, Utc};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;

const MAX_NOTIFICATIONS: usize = 100;

#[derive(Clone)]
pub struct NotificationService {
    log: Arc<Mutex<NotificationLog>>,
    ttl: Duration,
}

#[derive(Default)]
struct NotificationLog {
    next_id: u64,
    entries: VecDeque<Notification>,
}

impl NotificationService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            log: Arc::new(Mutex::new(NotificationLog::default())),
            ttl,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.push(message.into(), NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.push(message.into(), NotificationKind::Error)
    }

    /// Notifications still within their ttl, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        self.recent_at(Utc::now())
    }

    fn recent_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        self.expire(&mut log, now);
        log.entries.iter().cloned().collect()
    }

    fn push(&self, message: String, kind: NotificationKind) -> Notification {
        let now = Utc::now();
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        self.expire(&mut log, now);

        log.next_id += 1;
        let notification = Notification {
            id: log.next_id,
            message,
            kind,
            created_at: now,
        };
        debug!("notification {:?}: {}", kind, notification.message);

        if log.entries.len() == MAX_NOTIFICATIONS {
            log.entries.pop_front();
        }
        log.entries.push_back(notification.clone());
        notification
    }

    fn expire(&self, log: &mut NotificationLog, now: DateTime<Utc>) {
        while log
            .entries
            .front()
            .is_some_and(|n| n.created_at + self.ttl <= now)
        {
            log.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_kinds_and_increasing_ids() {
        let sink = NotificationService::new(Duration::seconds(5));
        let a = sink.success("Event saved successfully!");
        let b = sink.error("This slug is already in use. Please choose another.");
        assert!(b.id > a.id);

        let recent = sink.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].kind, NotificationKind::Success);
        assert_eq!(recent[1].kind, NotificationKind::Error);
    }

    #[test]
    fn expires_after_ttl() {
        let sink = NotificationService::new(Duration::seconds(5));
        sink.success("New event draft created!");
        let later = Utc::now() + Duration::seconds(6);
        assert!(sink.recent_at(later).is_empty());
    }

    #[test]
    fn keeps_a_bounded_log() {
        let sink = NotificationService::new(Duration::hours(1));
        for i in 0..(MAX_NOTIFICATIONS + 10) {
            sink.success(format!("message {i}"));
        }
        let recent = sink.recent();
        assert_eq!(recent.len(), MAX_NOTIFICATIONS);
        assert_eq!(recent[0].message, "message 10");
    }
}

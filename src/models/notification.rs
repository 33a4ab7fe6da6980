//! Transient, human-readable outcome messages.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Serialize, Clone, Debug)]
pub struct Notification {
    /// Monotonic per process.
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

//! Represents a photo in an event gallery and its moderation lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};
use uuid::Uuid;

/// A single gallery photo.
///
/// `object_key` is the logical storage path and is independent of the display
/// `url`, which may be any opaque reference (remote URL or `data:` URL).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Photo {
    /// Unique identifier across the whole store.
    pub id: Uuid,

    /// Back-reference to the owning event.
    pub event_id: Uuid,

    /// Logical storage key, e.g. `events/{event_id}/{file_name}`.
    pub object_key: String,

    /// Full-resolution reference.
    pub url: String,

    /// Thumbnail reference.
    pub thumb_url: String,

    /// Moderation state.
    pub status: PhotoStatus,

    /// Labels; set semantics.
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Creation time, never modified.
    pub created_at: DateTime<Utc>,
}

impl Photo {
    /// A freshly uploaded photo, always `Pending`.
    pub fn pending(
        event_id: Uuid,
        object_key: impl Into<String>,
        url: impl Into<String>,
        thumb_url: impl Into<String>,
        tags: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            object_key: object_key.into(),
            url: url.into(),
            thumb_url: thumb_url.into(),
            status: PhotoStatus::Pending,
            tags: tags.into_iter().collect(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhotoStatus {
    Pending,
    Ready,
    Held,
    Failed,
}

impl PhotoStatus {
    pub const ALL: [PhotoStatus; 4] = [
        PhotoStatus::Pending,
        PhotoStatus::Ready,
        PhotoStatus::Held,
        PhotoStatus::Failed,
    ];

    /// Whether moderation may move a photo from `self` to `next`.
    ///
    /// `Failed` is terminal; a retried upload becomes a new photo.
    pub fn can_transition_to(self, next: PhotoStatus) -> bool {
        use PhotoStatus::*;
        matches!(
            (self, next),
            (Pending, Ready)
                | (Pending, Held)
                | (Pending, Failed)
                | (Held, Ready)
                | (Held, Failed)
                | (Ready, Held)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhotoStatus::Pending => "PENDING",
            PhotoStatus::Ready => "READY",
            PhotoStatus::Held => "HELD",
            PhotoStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PhotoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

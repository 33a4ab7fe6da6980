//! Represents an event — the top-level container for a photo gallery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::photo::Photo;

/// An event shown on the public site once published.
///
/// Events act as the owner of their photos: a photo never exists outside the
/// `photos` list of exactly one event.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    /// Unique identifier, assigned at creation and never reused.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// URL-safe identifier, unique across all events.
    pub slug: String,

    /// When the event takes place.
    pub date: DateTime<Utc>,

    /// Free-text venue.
    pub location: String,

    /// Optional hero image reference.
    #[serde(default)]
    pub background_image_url: Option<String>,

    /// Alt text for the hero image.
    #[serde(default)]
    pub background_image_alt: Option<String>,

    /// Rich-text (HTML) description.
    #[serde(default)]
    pub writeup: Option<String>,

    /// Gallery, newest insertions first.
    #[serde(default)]
    pub photos: Vec<Photo>,

    /// Publish gate for the public site.
    pub published: bool,
}

/// Editable fields of an event as submitted by the admin editor.
///
/// `slug` is optional: when omitted it is derived from `name`, the same way the
/// editor recomputes the slug whenever the name changes.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct EventInput {
    pub name: String,
    pub slug: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: String,
    pub background_image_url: Option<String>,
    pub background_image_alt: Option<String>,
    pub writeup: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Compact listing row without the gallery payload.
#[derive(Serialize, Clone, Debug)]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub background_image_url: Option<String>,
    pub published: bool,
    pub photo_count: usize,
}

impl Event {
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            date: self.date,
            location: self.location.clone(),
            background_image_url: self.background_image_url.clone(),
            published: self.published,
            photo_count: self.photos.len(),
        }
    }

    /// Look up one of this event's photos.
    pub fn photo(&self, photo_id: Uuid) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == photo_id)
    }
}

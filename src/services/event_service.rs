//! src/services/event_service.rs
//!
//! EventService — the shared, request-facing handle on the `EventStore`.
//! Every call takes the store lock exactly once, so a mutation is atomic with
//! respect to concurrent requests, and every mutating call reports its outcome
//! to the `NotificationService`.

use crate::{
    models::{
        event::{Event, EventInput},
        photo::{Photo, PhotoStatus},
    },
    services::{
        event_store::{EventStore, StoreError, StoreResult, StoreStats},
        notification_service::NotificationService,
        slug::slugify,
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct EventService {
    store: Arc<RwLock<EventStore>>,
    notifications: NotificationService,
}

impl EventService {
    pub fn new(notifications: NotificationService) -> Self {
        Self {
            store: Arc::new(RwLock::new(EventStore::new())),
            notifications,
        }
    }

    /// Load pre-built events without emitting notifications.
    ///
    /// The first event in `events` ends up first in the listing.
    pub async fn seed(&self, events: Vec<Event>) -> StoreResult<usize> {
        let mut store = self.store.write().await;
        let count = events.len();
        for event in events.into_iter().rev() {
            store.insert_event(event)?;
        }
        Ok(count)
    }

    pub async fn create_draft_event(&self) -> Event {
        let event = self.store.write().await.create_draft_event();
        info!("created draft event {} ({})", event.id, event.slug);
        self.notifications.success("New event draft created!");
        event
    }

    /// Apply the editor's fields to an existing event and save it.
    ///
    /// The slug is re-derived from the name when the input carries none, and
    /// any submitted slug is normalised with `slugify`. Photos are kept.
    pub async fn apply_input(&self, id: Uuid, input: EventInput) -> StoreResult<Event> {
        let result = {
            let mut store = self.store.write().await;
            match store.get_event(id) {
                Some(current) => {
                    let updated = merge_input(current, input);
                    store.update_event(updated)
                }
                None => Err(StoreError::EventNotFound(id)),
            }
        };
        self.report(result, |event| {
            info!("saved event {} ({})", event.id, event.slug);
            "Event saved successfully!".to_string()
        })
    }

    pub async fn delete_event(&self, id: Uuid) -> StoreResult<Event> {
        let result = self.store.write().await.delete_event(id);
        self.report(result, |event| {
            info!(
                "deleted event {} with {} photos",
                event.id,
                event.photos.len()
            );
            "Event deleted.".to_string()
        })
    }

    pub async fn add_photos_to_event(&self, event_id: Uuid, photos: Vec<Photo>) -> StoreResult<Event> {
        let count = photos.len();
        let result = self
            .store
            .write()
            .await
            .add_photos_to_event(event_id, photos)
            .cloned();
        self.report(result, |event| {
            info!("added {} photos to event {}", count, event.id);
            format!("{} photos added to \"{}\"!", count, event.name)
        })
    }

    pub async fn set_photo_status(&self, photo_id: Uuid, status: PhotoStatus) -> StoreResult<Photo> {
        let result = self.store.write().await.set_photo_status(photo_id, status);
        self.report(result, |photo| {
            info!("photo {} is now {}", photo.id, photo.status);
            format!("Photo marked {}.", photo.status)
        })
    }

    pub async fn delete_photo(&self, photo_id: Uuid) -> StoreResult<Photo> {
        let result = self.store.write().await.delete_photo(photo_id);
        self.report(result, |photo| {
            info!("deleted photo {} from event {}", photo.id, photo.event_id);
            "Photo deleted.".to_string()
        })
    }

    pub async fn get_event(&self, id: Uuid) -> Option<Event> {
        self.store.read().await.get_event(id).cloned()
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> StoreResult<Event> {
        debug!("looking up event by slug {}", slug);
        self.store
            .read()
            .await
            .get_event_by_slug(slug)
            .cloned()
            .ok_or_else(|| StoreError::SlugNotFound(slug.to_string()))
    }

    /// Like `get_event_by_slug`, but drafts are invisible.
    pub async fn get_published_event_by_slug(&self, slug: &str) -> StoreResult<Event> {
        self.get_event_by_slug(slug)
            .await
            .and_then(|event| {
                if event.published {
                    Ok(event)
                } else {
                    Err(StoreError::SlugNotFound(slug.to_string()))
                }
            })
    }

    pub async fn list_events(&self) -> Vec<Event> {
        self.store
            .read()
            .await
            .list_events()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn list_published_events(&self) -> Vec<Event> {
        self.store
            .read()
            .await
            .list_published_events()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Upcoming events and recent galleries for the public home page, read
    /// under one lock.
    pub async fn home_page(
        &self,
        now: DateTime<Utc>,
        upcoming_limit: usize,
        gallery_limit: usize,
    ) -> (Vec<Event>, Vec<Event>) {
        let store = self.store.read().await;
        let upcoming = store
            .upcoming_events(now, upcoming_limit)
            .into_iter()
            .cloned()
            .collect();
        let galleries = store
            .recent_galleries(now, gallery_limit)
            .into_iter()
            .cloned()
            .collect();
        (upcoming, galleries)
    }

    pub async fn event_photos(
        &self,
        event_id: Uuid,
        status: Option<PhotoStatus>,
    ) -> StoreResult<Vec<Photo>> {
        self.store
            .read()
            .await
            .event_photos(event_id, status)
            .map(|photos| photos.into_iter().cloned().collect())
    }

    pub async fn stats(&self) -> StoreStats {
        self.store.read().await.stats()
    }

    /// Number of events, used by the readiness probe.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    fn report<T>(&self, result: StoreResult<T>, on_success: impl FnOnce(&T) -> String) -> StoreResult<T> {
        match &result {
            Ok(value) => {
                self.notifications.success(on_success(value));
            }
            Err(err) => {
                warn!("event store rejected operation: {}", err);
                self.notifications.error(err.to_string());
            }
        }
        result
    }
}

fn merge_input(current: &Event, input: EventInput) -> Event {
    let slug = match input.slug.as_deref() {
        Some(slug) => slugify(slug),
        None => slugify(&input.name),
    };

    Event {
        id: current.id,
        name: input.name.trim().to_string(),
        slug,
        date: input.date.unwrap_or(current.date),
        location: input.location.trim().to_string(),
        background_image_url: non_blank(input.background_image_url),
        background_image_alt: non_blank(input.background_image_alt),
        writeup: non_blank(input.writeup),
        photos: current.photos.clone(),
        published: input.published,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

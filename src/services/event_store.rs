//! src/services/event_store.rs
//!
//! EventStore — the authoritative in-memory collection of events and their
//! photos. Events are indexed by id, with a separate list keeping creation
//! order (newest first) and secondary indexes for slugs and photo ownership.
//! Every mutating operation validates first and only then writes, so a
//! rejected call leaves the store untouched.

use crate::{
    models::{
        event::Event,
        photo::{Photo, PhotoStatus},
    },
    services::slug::slugify,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const DRAFT_EVENT_NAME: &str = "Untitled Event";
pub const DRAFT_EVENT_LOCATION: &str = "TBD";
const DRAFT_SLUG_PREFIX: &str = "untitled-event-";

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("slug cannot be empty")]
    EmptySlug,
    #[error("This slug is already in use. Please choose another.")]
    SlugTaken(String),
    #[error("{0}")]
    Validation(String),
    #[error("event `{0}` not found")]
    EventNotFound(Uuid),
    #[error("event `{0}` not found")]
    SlugNotFound(String),
    #[error("photo `{0}` not found")]
    PhotoNotFound(Uuid),
    #[error("cannot move photo from {from} to {to}")]
    InvalidTransition { from: PhotoStatus, to: PhotoStatus },
}

impl StoreError {
    /// True for rejected input, as opposed to lookups that missed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::EmptySlug | StoreError::SlugTaken(_) | StoreError::Validation(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::EventNotFound(_) | StoreError::SlugNotFound(_) | StoreError::PhotoNotFound(_)
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Aggregate counters for the admin dashboard.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub total_events: usize,
    pub published_events: usize,
    pub total_photos: usize,
    pub photos_by_status: BTreeMap<PhotoStatus, usize>,
}

#[derive(Debug, Default)]
pub struct EventStore {
    /// Events keyed by id.
    events: HashMap<Uuid, Event>,

    /// Ids in listing order, most recently created first.
    order: Vec<Uuid>,

    /// slug -> owning event id.
    slugs: HashMap<String, Uuid>,

    /// photo id -> owning event id.
    photo_owners: HashMap<Uuid, Uuid>,

    /// Ids of deleted events; never handed out again.
    retired: HashSet<Uuid>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a fully formed event at the front of the listing.
    ///
    /// Used for seeding. Applies the same checks as an update plus id
    /// freshness: the id must not belong to a live or deleted event.
    pub fn insert_event(&mut self, event: Event) -> StoreResult<()> {
        if self.events.contains_key(&event.id) || self.retired.contains(&event.id) {
            return Err(StoreError::Validation(format!(
                "event id `{}` is already in use",
                event.id
            )));
        }
        self.validate_record(&event)?;

        self.index_event(&event);
        self.order.insert(0, event.id);
        self.events.insert(event.id, event);
        Ok(())
    }

    /// Allocate an unpublished draft with a placeholder name and slug and put
    /// it at the front of the listing.
    pub fn create_draft_event(&mut self) -> Event {
        let id = self.fresh_event_id();
        let event = Event {
            id,
            name: DRAFT_EVENT_NAME.to_string(),
            slug: self.fresh_draft_slug(),
            date: Utc::now(),
            location: DRAFT_EVENT_LOCATION.to_string(),
            background_image_url: None,
            background_image_alt: None,
            writeup: None,
            photos: Vec::new(),
            published: false,
        };

        self.slugs.insert(event.slug.clone(), id);
        self.order.insert(0, id);
        self.events.insert(id, event.clone());
        debug!("created draft event {} ({})", id, event.slug);
        event
    }

    /// Replace the stored record with the same id wholesale.
    ///
    /// Rejects an unknown id, an empty or colliding slug, and photos that do
    /// not point back at this event or that another event already owns.
    pub fn update_event(&mut self, event: Event) -> StoreResult<Event> {
        let previous = self
            .events
            .get(&event.id)
            .ok_or(StoreError::EventNotFound(event.id))?;
        self.validate_record(&event)?;

        let previous_slug = previous.slug.clone();
        let previous_photos: Vec<Uuid> = previous.photos.iter().map(|p| p.id).collect();

        self.slugs.remove(&previous_slug);
        for photo_id in previous_photos {
            self.photo_owners.remove(&photo_id);
        }
        self.index_event(&event);
        self.events.insert(event.id, event.clone());
        Ok(event)
    }

    /// Remove an event together with every photo it owns.
    pub fn delete_event(&mut self, id: Uuid) -> StoreResult<Event> {
        let event = self
            .events
            .remove(&id)
            .ok_or(StoreError::EventNotFound(id))?;

        self.order.retain(|candidate| *candidate != id);
        self.slugs.remove(&event.slug);
        for photo in &event.photos {
            self.photo_owners.remove(&photo.id);
        }
        self.retired.insert(id);
        Ok(event)
    }

    /// Prepend a batch of photos to an event's gallery, keeping batch order.
    ///
    /// The whole batch is rejected if any photo belongs to another event, has
    /// an id already in the store, or repeats an id within the batch.
    pub fn add_photos_to_event(&mut self, event_id: Uuid, photos: Vec<Photo>) -> StoreResult<&Event> {
        if !self.events.contains_key(&event_id) {
            return Err(StoreError::EventNotFound(event_id));
        }

        let mut batch_ids = HashSet::with_capacity(photos.len());
        for photo in &photos {
            if photo.event_id != event_id {
                return Err(StoreError::Validation(format!(
                    "photo `{}` belongs to event `{}`, not `{}`",
                    photo.id, photo.event_id, event_id
                )));
            }
            if self.photo_owners.contains_key(&photo.id) || !batch_ids.insert(photo.id) {
                return Err(StoreError::Validation(format!(
                    "photo id `{}` is already in use",
                    photo.id
                )));
            }
        }

        for photo in &photos {
            self.photo_owners.insert(photo.id, event_id);
        }
        let event = self
            .events
            .get_mut(&event_id)
            .ok_or(StoreError::EventNotFound(event_id))?;
        event.photos.splice(0..0, photos);
        Ok(&*event)
    }

    pub fn get_event(&self, id: Uuid) -> Option<&Event> {
        self.events.get(&id)
    }

    pub fn get_event_by_slug(&self, slug: &str) -> Option<&Event> {
        self.slugs.get(slug).and_then(|id| self.events.get(id))
    }

    /// All events in insertion order, newest created first.
    pub fn list_events(&self) -> Vec<&Event> {
        self.order
            .iter()
            .filter_map(|id| self.events.get(id))
            .collect()
    }

    /// Published events only, latest date first.
    pub fn list_published_events(&self) -> Vec<&Event> {
        let mut published: Vec<&Event> = self
            .list_events()
            .into_iter()
            .filter(|event| event.published)
            .collect();
        published.sort_by(|a, b| b.date.cmp(&a.date));
        published
    }

    /// Published events dated after `now`, soonest first.
    pub fn upcoming_events(&self, now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
        let mut upcoming: Vec<&Event> = self
            .events
            .values()
            .filter(|event| event.published && event.date > now)
            .collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date));
        upcoming.truncate(limit);
        upcoming
    }

    /// Published events dated at or before `now` that have photos, latest first.
    pub fn recent_galleries(&self, now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
        let mut galleries: Vec<&Event> = self
            .list_published_events()
            .into_iter()
            .filter(|event| event.date <= now && !event.photos.is_empty())
            .collect();
        galleries.truncate(limit);
        galleries
    }

    /// Photos of one event, optionally filtered by status, in gallery order.
    pub fn event_photos(
        &self,
        event_id: Uuid,
        status: Option<PhotoStatus>,
    ) -> StoreResult<Vec<&Photo>> {
        let event = self
            .events
            .get(&event_id)
            .ok_or(StoreError::EventNotFound(event_id))?;
        Ok(event
            .photos
            .iter()
            .filter(|photo| status.is_none_or(|wanted| photo.status == wanted))
            .collect())
    }

    /// Move a photo along the moderation state machine.
    ///
    /// Re-applying the current status is accepted and changes nothing.
    pub fn set_photo_status(&mut self, photo_id: Uuid, status: PhotoStatus) -> StoreResult<Photo> {
        let photo = self.photo_mut(photo_id)?;
        if photo.status != status {
            if !photo.status.can_transition_to(status) {
                return Err(StoreError::InvalidTransition {
                    from: photo.status,
                    to: status,
                });
            }
            photo.status = status;
        }
        Ok(photo.clone())
    }

    pub fn delete_photo(&mut self, photo_id: Uuid) -> StoreResult<Photo> {
        let event_id = self
            .photo_owners
            .remove(&photo_id)
            .ok_or(StoreError::PhotoNotFound(photo_id))?;
        let event = self
            .events
            .get_mut(&event_id)
            .ok_or(StoreError::EventNotFound(event_id))?;
        let index = event
            .photos
            .iter()
            .position(|p| p.id == photo_id)
            .ok_or(StoreError::PhotoNotFound(photo_id))?;
        Ok(event.photos.remove(index))
    }

    pub fn stats(&self) -> StoreStats {
        let mut photos_by_status: BTreeMap<PhotoStatus, usize> =
            PhotoStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut total_photos = 0;
        for event in self.events.values() {
            total_photos += event.photos.len();
            for photo in &event.photos {
                *photos_by_status.entry(photo.status).or_default() += 1;
            }
        }

        StoreStats {
            total_events: self.events.len(),
            published_events: self.events.values().filter(|e| e.published).count(),
            total_photos,
            photos_by_status,
        }
    }

    fn photo_mut(&mut self, photo_id: Uuid) -> StoreResult<&mut Photo> {
        let event_id = *self
            .photo_owners
            .get(&photo_id)
            .ok_or(StoreError::PhotoNotFound(photo_id))?;
        self.events
            .get_mut(&event_id)
            .and_then(|event| event.photos.iter_mut().find(|p| p.id == photo_id))
            .ok_or(StoreError::PhotoNotFound(photo_id))
    }

    /// Checks shared by insert and update. `event.id` may or may not be live.
    fn validate_record(&self, event: &Event) -> StoreResult<()> {
        if event.name.trim().is_empty() {
            return Err(StoreError::Validation("event name cannot be empty".into()));
        }
        if event.slug.is_empty() {
            return Err(StoreError::EmptySlug);
        }
        if slugify(&event.slug) != event.slug {
            return Err(StoreError::Validation(format!(
                "slug `{}` is not URL-safe",
                event.slug
            )));
        }
        if let Some(owner) = self.slugs.get(&event.slug) {
            if *owner != event.id {
                return Err(StoreError::SlugTaken(event.slug.clone()));
            }
        }

        let previous = self.events.get(&event.id);
        let mut seen = HashSet::with_capacity(event.photos.len());
        for photo in &event.photos {
            if photo.event_id != event.id {
                return Err(StoreError::Validation(format!(
                    "photo `{}` belongs to event `{}`, not `{}`",
                    photo.id, photo.event_id, event.id
                )));
            }
            let foreign = self
                .photo_owners
                .get(&photo.id)
                .is_some_and(|owner| *owner != event.id);
            if foreign || !seen.insert(photo.id) {
                return Err(StoreError::Validation(format!(
                    "photo id `{}` is already in use",
                    photo.id
                )));
            }
            if let Some(previous) = previous.and_then(|prev| prev.photo(photo.id)) {
                check_photo_change(previous, photo)?;
            }
        }
        Ok(())
    }

    fn index_event(&mut self, event: &Event) {
        self.slugs.insert(event.slug.clone(), event.id);
        for photo in &event.photos {
            self.photo_owners.insert(photo.id, event.id);
        }
    }

    fn fresh_event_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if !self.events.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }

    /// `untitled-event-<millis>`, bumped until no event holds it.
    fn fresh_draft_slug(&self) -> String {
        let mut token = Utc::now().timestamp_millis();
        loop {
            let slug = format!("{DRAFT_SLUG_PREFIX}{token}");
            if !self.slugs.contains_key(&slug) {
                return slug;
            }
            token += 1;
        }
    }
}

/// A photo kept across a wholesale update may only move along the moderation
/// state machine; its owner and creation time are fixed.
fn check_photo_change(previous: &Photo, next: &Photo) -> StoreResult<()> {
    if next.event_id != previous.event_id || next.created_at != previous.created_at {
        return Err(StoreError::Validation(format!(
            "photo `{}` cannot change its owner or creation time",
            next.id
        )));
    }
    if next.status != previous.status && !previous.status.can_transition_to(next.status) {
        return Err(StoreError::InvalidTransition {
            from: previous.status,
            to: next.status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_for(event_id: Uuid, name: &str) -> Photo {
        Photo::pending(
            event_id,
            format!("events/{event_id}/{name}"),
            format!("https://img.test/{name}"),
            format!("https://img.test/thumb/{name}"),
            Vec::new(),
        )
    }

    fn named(store: &mut EventStore, name: &str) -> Event {
        let mut event = store.create_draft_event();
        event.name = name.to_string();
        event.slug = slugify(name);
        store.update_event(event).unwrap()
    }

    fn assert_unique_slugs(store: &EventStore) {
        let events = store.list_events();
        let slugs: HashSet<&str> = events.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs.len(), events.len());
    }

    #[test]
    fn draft_is_unpublished_and_empty() {
        let mut store = EventStore::new();
        let draft = store.create_draft_event();
        assert!(!draft.published);
        assert!(draft.photos.is_empty());
        assert_eq!(draft.name, DRAFT_EVENT_NAME);
        assert!(draft.slug.starts_with("untitled-event-"));
        assert!(draft.writeup.is_none());
        assert_eq!(store.get_event_by_slug(&draft.slug), Some(&draft));
    }

    #[test]
    fn drafts_get_distinct_slugs_and_newest_first() {
        let mut store = EventStore::new();
        let first = store.create_draft_event();
        let second = store.create_draft_event();
        let third = store.create_draft_event();
        assert_ne!(first.slug, second.slug);
        assert_ne!(second.slug, third.slug);

        let ids: Vec<Uuid> = store.list_events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn renamed_draft_takes_derived_slug_and_blocks_duplicates() {
        let mut store = EventStore::new();
        let existing = named(&mut store, "Annual Gala");

        let mut draft = store.create_draft_event();
        draft.name = "Tech Talk".into();
        draft.slug = slugify(&draft.name);
        let saved = store.update_event(draft).unwrap();
        assert_eq!(saved.slug, "tech-talk");

        let mut clash = existing.clone();
        clash.slug = "tech-talk".into();
        let err = store.update_event(clash).unwrap_err();
        assert_eq!(err, StoreError::SlugTaken("tech-talk".into()));
        assert!(err.is_validation());

        // rejected update left the original record alone
        assert_eq!(store.get_event(existing.id).unwrap().slug, "annual-gala");
        assert_unique_slugs(&store);
    }

    #[test]
    fn update_keeps_own_slug_and_frees_old_one() {
        let mut store = EventStore::new();
        let mut event = named(&mut store, "Summer Fest");
        event.location = "Greenfield Park".into();
        store.update_event(event.clone()).unwrap();

        event.slug = "summer-fest-2024".into();
        store.update_event(event.clone()).unwrap();
        assert!(store.get_event_by_slug("summer-fest").is_none());
        assert_eq!(
            store.get_event_by_slug("summer-fest-2024").unwrap().location,
            "Greenfield Park"
        );

        let other = named(&mut store, "Summer Fest");
        assert_eq!(other.slug, "summer-fest");
    }

    #[test]
    fn update_rejects_empty_or_unsafe_slug() {
        let mut store = EventStore::new();
        let mut event = store.create_draft_event();
        event.slug = String::new();
        assert_eq!(store.update_event(event.clone()), Err(StoreError::EmptySlug));

        event.slug = "Not A Slug".into();
        assert!(matches!(
            store.update_event(event),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = EventStore::new();
        let mut ghost = store.create_draft_event();
        store.delete_event(ghost.id).unwrap();
        ghost.slug = "ghost".into();
        assert_eq!(
            store.update_event(ghost.clone()),
            Err(StoreError::EventNotFound(ghost.id))
        );
    }

    #[test]
    fn update_rejects_foreign_photos() {
        let mut store = EventStore::new();
        let a = named(&mut store, "A");
        let b = named(&mut store, "B");
        store
            .add_photos_to_event(a.id, vec![photo_for(a.id, "one.jpg")])
            .unwrap();

        let stolen = store.get_event(a.id).unwrap().photos[0].clone();
        let mut b_with_stolen = b.clone();
        b_with_stolen.photos.push(stolen.clone());
        assert!(store.update_event(b_with_stolen).is_err());

        let mut relabeled = stolen;
        relabeled.event_id = b.id;
        let mut b_relabeled = b;
        b_relabeled.photos.push(relabeled);
        assert!(store.update_event(b_relabeled).is_err());
    }

    #[test]
    fn update_keeps_kept_photos_on_the_state_machine() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Gala");
        let photo = photo_for(event.id, "one.jpg");
        let photo_id = photo.id;
        store.add_photos_to_event(event.id, vec![photo]).unwrap();
        store
            .set_photo_status(photo_id, PhotoStatus::Failed)
            .unwrap();

        let mut revived = store.get_event(event.id).unwrap().clone();
        revived.photos[0].status = PhotoStatus::Ready;
        let err = store.update_event(revived).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                from: PhotoStatus::Failed,
                to: PhotoStatus::Ready,
            }
        );

        let mut backdated = store.get_event(event.id).unwrap().clone();
        backdated.photos[0].created_at = "2000-01-01T00:00:00Z".parse().unwrap();
        assert!(store.update_event(backdated).unwrap_err().is_validation());

        let stored = store.get_event(event.id).unwrap().photo(photo_id).unwrap();
        assert_eq!(stored.status, PhotoStatus::Failed);
        assert_ne!(stored.created_at.timestamp(), 946_684_800);
    }

    #[test]
    fn update_allows_legal_status_moves_on_kept_photos() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Gala");
        let photo = photo_for(event.id, "one.jpg");
        store.add_photos_to_event(event.id, vec![photo]).unwrap();

        let mut held = store.get_event(event.id).unwrap().clone();
        held.photos[0].status = PhotoStatus::Held;
        let saved = store.update_event(held).unwrap();
        assert_eq!(saved.photos[0].status, PhotoStatus::Held);
    }

    #[test]
    fn home_page_lists() {
        let mut store = EventStore::new();
        let now: DateTime<Utc> = "2025-06-01T12:00:00Z".parse().unwrap();
        let day = chrono::Duration::days(1);

        let mut ids = Vec::new();
        for (name, offset, published, photos) in [
            ("Past With Photos", -10, true, true),
            ("Past Empty", -5, true, false),
            ("Older Past", -20, true, true),
            ("Draft Past", -2, false, true),
            ("Soon", 3, true, false),
            ("Later", 30, true, true),
            ("Draft Soon", 1, false, false),
        ] {
            let mut event = named(&mut store, name);
            event.date = now + day * offset;
            event.published = published;
            let event = store.update_event(event).unwrap();
            if photos {
                store
                    .add_photos_to_event(event.id, vec![photo_for(event.id, "p.jpg")])
                    .unwrap();
            }
            ids.push(event.id);
        }

        let upcoming: Vec<Uuid> = store.upcoming_events(now, 3).iter().map(|e| e.id).collect();
        assert_eq!(upcoming, vec![ids[4], ids[5]]);

        let galleries: Vec<Uuid> = store.recent_galleries(now, 4).iter().map(|e| e.id).collect();
        assert_eq!(galleries, vec![ids[0], ids[2]]);

        assert_eq!(store.recent_galleries(now, 1).len(), 1);
        assert_eq!(store.upcoming_events(now, 1)[0].id, ids[4]);
    }

    #[test]
    fn delete_cascades_to_photos() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Corporate Retreat");
        let p1 = photo_for(event.id, "1.jpg");
        let p2 = photo_for(event.id, "2.jpg");
        let photo_ids = [p1.id, p2.id];
        store.add_photos_to_event(event.id, vec![p1, p2]).unwrap();

        let removed = store.delete_event(event.id).unwrap();
        assert_eq!(removed.photos.len(), 2);
        assert!(store.get_event_by_slug("corporate-retreat").is_none());
        assert!(store.is_empty());
        for id in photo_ids {
            assert_eq!(
                store.set_photo_status(id, PhotoStatus::Ready),
                Err(StoreError::PhotoNotFound(id))
            );
        }
        assert_eq!(store.stats().total_photos, 0);
    }

    #[test]
    fn delete_missing_event_is_not_found() {
        let mut store = EventStore::new();
        let id = Uuid::new_v4();
        assert_eq!(store.delete_event(id), Err(StoreError::EventNotFound(id)));
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut store = EventStore::new();
        let event = store.create_draft_event();
        let removed = store.delete_event(event.id).unwrap();
        assert!(store.insert_event(removed).is_err());
    }

    #[test]
    fn photos_are_prepended_in_batch_order() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Gallery");
        let old = photo_for(event.id, "old.jpg");
        store.add_photos_to_event(event.id, vec![old.clone()]).unwrap();

        let p1 = photo_for(event.id, "p1.jpg");
        let p2 = photo_for(event.id, "p2.jpg");
        let updated = store
            .add_photos_to_event(event.id, vec![p1.clone(), p2.clone()])
            .unwrap();
        let ids: Vec<Uuid> = updated.photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p1.id, p2.id, old.id]);
    }

    #[test]
    fn add_photos_rejects_whole_batch_on_bad_photo() {
        let mut store = EventStore::new();
        let a = named(&mut store, "A");
        let b = named(&mut store, "B");
        let good = photo_for(a.id, "good.jpg");
        let wrong_owner = photo_for(b.id, "bad.jpg");

        let err = store
            .add_photos_to_event(a.id, vec![good.clone(), wrong_owner])
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.get_event(a.id).unwrap().photos.is_empty());

        let dup = good.clone();
        assert!(store.add_photos_to_event(a.id, vec![good, dup]).is_err());
        assert!(store.get_event(a.id).unwrap().photos.is_empty());
    }

    #[test]
    fn add_photos_to_missing_event_is_not_found() {
        let mut store = EventStore::new();
        let id = Uuid::new_v4();
        let err = store
            .add_photos_to_event(id, vec![photo_for(id, "x.jpg")])
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn status_changes_follow_the_state_machine() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Moderation");
        let photo = photo_for(event.id, "m.jpg");
        let id = photo.id;
        store.add_photos_to_event(event.id, vec![photo]).unwrap();

        let held = store.set_photo_status(id, PhotoStatus::Held).unwrap();
        assert_eq!(held.status, PhotoStatus::Held);
        let ready = store.set_photo_status(id, PhotoStatus::Ready).unwrap();
        assert_eq!(ready.status, PhotoStatus::Ready);
        let again = store.set_photo_status(id, PhotoStatus::Ready).unwrap();
        assert_eq!(again, ready);
        assert_eq!(
            store.set_photo_status(id, PhotoStatus::Failed),
            Err(StoreError::InvalidTransition {
                from: PhotoStatus::Ready,
                to: PhotoStatus::Failed
            })
        );
        store.set_photo_status(id, PhotoStatus::Held).unwrap();
        store.set_photo_status(id, PhotoStatus::Failed).unwrap();
        assert!(store.set_photo_status(id, PhotoStatus::Ready).is_err());

        // the rejected transitions never reached the stored photo
        let stored = store.get_event(event.id).unwrap().photo(id).unwrap();
        assert_eq!(stored.status, PhotoStatus::Failed);
    }

    #[test]
    fn delete_photo_removes_only_that_photo() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Trim");
        let keep = photo_for(event.id, "keep.jpg");
        let dropped = photo_for(event.id, "drop.jpg");
        let drop_id = dropped.id;
        store
            .add_photos_to_event(event.id, vec![keep.clone(), dropped])
            .unwrap();

        assert_eq!(store.delete_photo(drop_id).unwrap().id, drop_id);
        assert_eq!(store.get_event(event.id).unwrap().photos, vec![keep]);
        assert_eq!(
            store.delete_photo(drop_id),
            Err(StoreError::PhotoNotFound(drop_id))
        );
    }

    #[test]
    fn listing_is_insertion_order_but_published_is_by_date() {
        let mut store = EventStore::new();
        let mut older = named(&mut store, "Older");
        older.date = "2024-01-01T00:00:00Z".parse().unwrap();
        older.published = true;
        store.update_event(older.clone()).unwrap();

        let mut newer = named(&mut store, "Newer");
        newer.date = "2025-01-01T00:00:00Z".parse().unwrap();
        newer.published = true;
        store.update_event(newer.clone()).unwrap();

        let mut latest_created = named(&mut store, "Middle");
        latest_created.date = "2024-06-01T00:00:00Z".parse().unwrap();
        latest_created.published = true;
        store.update_event(latest_created.clone()).unwrap();

        let draft = store.create_draft_event();

        let listed: Vec<Uuid> = store.list_events().iter().map(|e| e.id).collect();
        assert_eq!(listed, vec![draft.id, latest_created.id, newer.id, older.id]);

        let public: Vec<Uuid> = store.list_published_events().iter().map(|e| e.id).collect();
        assert_eq!(public, vec![newer.id, latest_created.id, older.id]);
    }

    #[test]
    fn event_photos_filters_by_status() {
        let mut store = EventStore::new();
        let event = named(&mut store, "Filter");
        let a = photo_for(event.id, "a.jpg");
        let b = photo_for(event.id, "b.jpg");
        let a_id = a.id;
        store.add_photos_to_event(event.id, vec![a, b]).unwrap();
        store.set_photo_status(a_id, PhotoStatus::Ready).unwrap();

        let ready = store.event_photos(event.id, Some(PhotoStatus::Ready)).unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id, a_id);
        assert_eq!(store.event_photos(event.id, None).unwrap().len(), 2);
    }

    #[test]
    fn stats_count_events_and_photo_statuses() {
        let mut store = EventStore::new();
        let mut event = named(&mut store, "Stats");
        event.published = true;
        store.update_event(event.clone()).unwrap();
        store.create_draft_event();
        store
            .add_photos_to_event(
                event.id,
                vec![photo_for(event.id, "1.jpg"), photo_for(event.id, "2.jpg")],
            )
            .unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.published_events, 1);
        assert_eq!(stats.total_photos, 2);
        assert_eq!(stats.photos_by_status[&PhotoStatus::Pending], 2);
        assert_eq!(stats.photos_by_status[&PhotoStatus::Failed], 0);
    }

    #[test]
    fn slugs_stay_unique_across_mixed_operations() {
        let mut store = EventStore::new();
        let names = ["Jazz Night", "Jazz  Night", "jazz night!", "Food Fair", "Tech Talk"];
        for name in names {
            let mut draft = store.create_draft_event();
            draft.name = name.to_string();
            draft.slug = slugify(name);
            if store.update_event(draft.clone()).is_err() {
                store.delete_event(draft.id).unwrap();
            }
            assert_unique_slugs(&store);
        }
        assert_eq!(store.len(), 3);
    }
}

//! Demo catalogue loaded with `--seed`.

use crate::models::{
    event::Event,
    photo::{Photo, PhotoStatus},
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Statuses cycled through so the admin views show every state.
const STATUS_CYCLE: [PhotoStatus; 4] = [
    PhotoStatus::Ready,
    PhotoStatus::Pending,
    PhotoStatus::Held,
    PhotoStatus::Failed,
];

struct DemoEvent {
    name: &'static str,
    slug: &'static str,
    date: &'static str,
    location: &'static str,
    image_seed: &'static str,
    writeup: &'static str,
    photo_count: usize,
    tags: &'static [&'static str],
    published: bool,
}

const DEMO_EVENTS: [DemoEvent; 4] = [
    DemoEvent {
        name: "Tech Summit 2024",
        slug: "tech-summit-2024",
        date: "2024-10-26T09:00:00Z",
        location: "Metropolis Convention Center",
        image_seed: "techsummit2024",
        writeup: "<h3>A Glimpse into Tomorrow</h3><p>Tech Summit 2024 brought together the brightest minds in technology for a day of innovation, networking, and groundbreaking announcements. From AI to quantum computing, the future was on full display.</p>",
        photo_count: 12,
        tags: &["tech", "conference"],
        published: true,
    },
    DemoEvent {
        name: "Annual Charity Gala",
        slug: "annual-charity-gala-2024",
        date: "2024-11-15T18:00:00Z",
        location: "Grand Ballroom, Plaza Hotel",
        image_seed: "charitygala2024",
        writeup: "<h3>An Evening of Elegance and Giving</h3><p>Our Annual Charity Gala was a resounding success, raising funds for local communities. Guests enjoyed a night of fine dining, live music, and heartfelt speeches, all for a great cause.</p>",
        photo_count: 18,
        tags: &["gala", "charity", "formal"],
        published: true,
    },
    DemoEvent {
        name: "Summer Music Festival",
        slug: "summer-music-festival-2024",
        date: "2024-08-05T14:00:00Z",
        location: "Greenfield Park",
        image_seed: "summerfest2024",
        writeup: "<h3>Vibes and Melodies Under the Sun</h3><p>The Summer Music Festival was an unforgettable weekend of music, art, and community. Thousands gathered to see their favorite artists perform across three stages in the beautiful Greenfield Park.</p>",
        photo_count: 24,
        tags: &["music", "festival", "outdoor"],
        published: true,
    },
    DemoEvent {
        name: "Corporate Retreat 2025",
        slug: "corporate-retreat-2025",
        date: "2025-01-20T10:00:00Z",
        location: "Lakeside Mountain Resort",
        image_seed: "retreat2025",
        writeup: "",
        photo_count: 8,
        tags: &["corporate", "retreat", "team"],
        published: false,
    },
];

/// Build the demo events, in listing order.
pub fn demo_events() -> Vec<Event> {
    let now = Utc::now();
    DEMO_EVENTS
        .iter()
        .map(|demo| {
            let id = Uuid::new_v4();
            Event {
                id,
                name: demo.name.to_string(),
                slug: demo.slug.to_string(),
                date: demo.date.parse::<DateTime<Utc>>().unwrap_or(now),
                location: demo.location.to_string(),
                background_image_url: Some(format!(
                    "https://picsum.photos/seed/{}/1920/1080",
                    demo.image_seed
                )),
                background_image_alt: Some(demo.name.to_string()),
                writeup: (!demo.writeup.is_empty()).then(|| demo.writeup.to_string()),
                photos: demo_photos(id, demo.photo_count, demo.tags, now),
                published: demo.published,
            }
        })
        .collect()
}

fn demo_photos(event_id: Uuid, count: usize, tags: &[&str], now: DateTime<Utc>) -> Vec<Photo> {
    (1..=count)
        .map(|n| {
            let seed = format!("{}{}", event_id.simple(), n);
            Photo {
                id: Uuid::new_v4(),
                event_id,
                object_key: format!("events/{}/photo-{}.jpg", event_id, n),
                url: format!("https://picsum.photos/seed/{}/1200/800", seed),
                thumb_url: format!("https://picsum.photos/seed/{}/400/300", seed),
                status: STATUS_CYCLE[(n - 1) % STATUS_CYCLE.len()],
                tags: tags.iter().map(|t| t.to_string()).collect(),
                created_at: now - Duration::days((n - 1) as i64),
            }
        })
        .collect()
}

//! Defines routes for the public site and the admin API.
//!
//! ## Structure
//! - **Public endpoints**
//!   - `GET  /api/home` — upcoming events and recent galleries
//!   - `GET  /api/events` — published events, newest first
//!   - `GET  /api/events/{slug}` — one published event with its gallery
//!   - `POST /api/vendors/inquiries` — vendor sign-up form
//!
//! - **Session endpoints**
//!   - `POST /api/auth/login`, `POST /api/auth/logout`, `GET /api/auth/me`
//!
//! - **Admin endpoints** (bearer token required)
//!   - `/api/admin/events[/{id}]` — event CRUD and writeup generation
//!   - `/api/admin/events/{id}/photos` — gallery listing and multipart upload
//!   - `/api/admin/photos/{id}[/status]` — moderation and removal
//!   - `/api/admin/uploads/image` — background image upload

use crate::{
    handlers::{
        admin_handlers::{dashboard, notifications},
        auth_handlers::{login, logout, me},
        event_handlers::{
            create_event, delete_event, generate_writeup, get_event, get_event_by_slug,
            get_public_event, home, list_events, list_public_events, update_event,
        },
        health_handlers::{healthz, readyz},
        photo_handlers::{delete_photo, list_photos, set_photo_status, upload_image, upload_photos},
        vendor_handlers::{list_inquiries, submit_inquiry},
    },
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};

/// Build the full router.
///
/// `upload_limit` caps the request body on the multipart routes; every other
/// route keeps axum's default limit.
pub fn routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // public site
        .route("/api/home", get(home))
        .route("/api/events", get(list_public_events))
        .route("/api/events/{slug}", get(get_public_event))
        .route("/api/vendors/inquiries", post(submit_inquiry))
        // session
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        // admin
        .route("/api/admin/dashboard", get(dashboard))
        .route("/api/admin/notifications", get(notifications))
        .route("/api/admin/events", get(list_events).post(create_event))
        .route(
            "/api/admin/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/admin/events/by-slug/{slug}", get(get_event_by_slug))
        .route("/api/admin/events/{id}/writeup", post(generate_writeup))
        .route(
            "/api/admin/events/{id}/photos",
            get(list_photos)
                .post(upload_photos)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/admin/photos/{id}", delete(delete_photo))
        .route("/api/admin/photos/{id}/status", put(set_photo_status))
        .route(
            "/api/admin/uploads/image",
            post(upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/admin/vendors/inquiries", get(list_inquiries))
}

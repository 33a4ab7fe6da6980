//! HTTP handlers for events: the public catalogue and the admin editor.
//! Store rules live in `EventService`; handlers only check access and shape
//! responses.

use crate::{
    errors::AppError,
    extractors::auth::AuthUser,
    models::event::{Event, EventInput, EventSummary},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

const HOME_UPCOMING_LIMIT: usize = 3;
const HOME_GALLERY_LIMIT: usize = 4;

#[derive(Debug, Serialize)]
pub struct WriteupResp {
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct HomeResp {
    pub upcoming_events: Vec<EventSummary>,
    pub recent_galleries: Vec<EventSummary>,
}

/// GET `/api/home` — next few published events and the latest past galleries.
pub async fn home(State(state): State<AppState>) -> Json<HomeResp> {
    let (upcoming, galleries) = state
        .events
        .home_page(Utc::now(), HOME_UPCOMING_LIMIT, HOME_GALLERY_LIMIT)
        .await;
    Json(HomeResp {
        upcoming_events: upcoming.iter().map(Event::summary).collect(),
        recent_galleries: galleries.iter().map(Event::summary).collect(),
    })
}

/// GET `/api/events` — published events, latest date first.
pub async fn list_public_events(State(state): State<AppState>) -> Json<Vec<EventSummary>> {
    let events = state.events.list_published_events().await;
    Json(events.iter().map(Event::summary).collect())
}

/// GET `/api/events/{slug}` — a published event with its gallery.
pub async fn get_public_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event = state.events.get_published_event_by_slug(&slug).await?;
    Ok(Json(event))
}

/// GET `/api/admin/events` — every event, most recently created first.
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EventSummary>>, AppError> {
    auth.require_admin()?;
    let events = state.events.list_events().await;
    Ok(Json(events.iter().map(Event::summary).collect()))
}

/// POST `/api/admin/events` — create a draft and return it for editing.
pub async fn create_event(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    let event = state.events.create_draft_event().await;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET `/api/admin/events/{id}`
pub async fn get_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    auth.require_admin()?;
    state
        .events
        .get_event(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("event `{}` not found", id)))
}

/// GET `/api/admin/events/by-slug/{slug}` — drafts included.
pub async fn get_event_by_slug(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Event>, AppError> {
    auth.require_admin()?;
    Ok(Json(state.events.get_event_by_slug(&slug).await?))
}

/// PUT `/api/admin/events/{id}` — save the editor form.
pub async fn update_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, AppError> {
    auth.require_admin()?;
    Ok(Json(state.events.apply_input(id, input).await?))
}

/// DELETE `/api/admin/events/{id}` — removes the event and its photos.
pub async fn delete_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    state.events.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/api/admin/events/{id}/writeup`
///
/// Returns generated HTML without saving it; the editor decides whether to
/// keep it. Always 200 once the event exists, even when generation fell back.
pub async fn generate_writeup(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteupResp>, AppError> {
    auth.require_admin()?;
    let event = state
        .events
        .get_event(id)
        .await
        .ok_or_else(|| AppError::not_found(format!("event `{}` not found", id)))?;

    let html = state
        .writeups
        .generate_writeup(&event.name, &event.location)
        .await;
    Ok(Json(WriteupResp { html }))
}

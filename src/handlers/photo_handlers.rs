//! HTTP handlers for gallery photos and image uploads.
//! Uploads are validated by `UploadService` before anything reaches the
//! store; a batch with one bad file is rejected as a whole.

use crate::{
    errors::AppError,
    extractors::auth::AuthUser,
    models::photo::{Photo, PhotoStatus},
    services::upload_service::{UploadedImage, photo_object_key},
    state::AppState,
};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use bytes::Bytes;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Query params accepted by the photo listing.
#[derive(Debug, Deserialize)]
pub struct PhotoFilter {
    pub status: Option<PhotoStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusReq {
    pub status: PhotoStatus,
}

/// One `file` part of a multipart body.
struct IncomingFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// GET `/api/admin/events/{id}/photos?status=`
pub async fn list_photos(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(filter): Query<PhotoFilter>,
) -> Result<Json<Vec<Photo>>, AppError> {
    let photos = state.events.event_photos(event_id, filter.status).await?;
    Ok(Json(photos))
}

/// POST `/api/admin/events/{id}/photos` — multipart `file` parts plus an
/// optional comma-separated `tags` field applied to every photo.
///
/// New photos start `PENDING` and are prepended to the gallery in upload
/// order. Files repeating an earlier file name in the same batch are skipped.
pub async fn upload_photos(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    if state.events.get_event(event_id).await.is_none() {
        return Err(AppError::not_found(format!("event `{}` not found", event_id)));
    }

    let mut files = Vec::new();
    let mut tags: Vec<String> = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                files.push(IncomingFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("tags") => {
                let text = field.text().await?;
                tags.extend(
                    text.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string),
                );
            }
            _ => {} // Ignore unknown fields.
        }
    }

    if files.is_empty() {
        state.notifications.error("Please add files to upload.");
        return Err(AppError::bad_request("Please add files to upload."));
    }

    let mut seen_names = HashSet::new();
    let mut photos = Vec::with_capacity(files.len());
    for file in files {
        let file_name = file
            .file_name
            .ok_or_else(|| AppError::bad_request("File field must have a filename"))?;
        if !seen_names.insert(file_name.clone()) {
            debug!("skipping duplicate file {} in batch", file_name);
            continue;
        }

        let uploaded = state
            .uploads
            .upload_image(
                Some(&file_name),
                file.content_type.as_deref(),
                &file.bytes,
            )
            .map_err(|err| {
                warn!("rejected upload {}: {}", file_name, err);
                state.notifications.error(err.to_string());
                AppError::from(err)
            })?;
        let object_key = photo_object_key(event_id, &file_name)?;
        photos.push(Photo::pending(
            event_id,
            object_key,
            uploaded.url.clone(),
            uploaded.url,
            tags.iter().cloned(),
        ));
    }

    let added = photos.clone();
    state.events.add_photos_to_event(event_id, photos).await?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// PUT `/api/admin/photos/{id}/status` — approve, hold or fail a photo.
pub async fn set_photo_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
    Json(req): Json<StatusReq>,
) -> Result<Json<Photo>, AppError> {
    Ok(Json(
        state.events.set_photo_status(photo_id, req.status).await?,
    ))
}

/// DELETE `/api/admin/photos/{id}`
pub async fn delete_photo(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.events.delete_photo(photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/api/admin/uploads/image` — single `file` part, returns its URL for
/// use as an event background image.
pub async fn upload_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedImage>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        let uploaded = state
            .uploads
            .upload_image(file_name.as_deref(), content_type.as_deref(), &bytes)
            .inspect_err(|err| {
                state.notifications.error(err.to_string());
            })?;
        return Ok(Json(uploaded));
    }

    Err(AppError::bad_request("Missing 'file' field"))
}

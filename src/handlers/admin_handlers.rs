//! Admin dashboard and notification feed.

use crate::{
    extractors::auth::AuthUser,
    models::{notification::Notification, user::User},
    services::event_store::StoreStats,
    state::AppState,
};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardResp {
    pub user: User,
    pub stats: StoreStats,
    pub summary: &'static str,
    pub max_upload_bytes: usize,
}

/// GET `/api/admin/dashboard`
pub async fn dashboard(auth: AuthUser, State(state): State<AppState>) -> Json<DashboardResp> {
    let summary = if auth.user.is_admin() {
        "You have full access to manage events, photos, and users."
    } else {
        "You can upload and manage photos for events."
    };

    Json(DashboardResp {
        stats: state.events.stats().await,
        user: auth.user,
        summary,
        max_upload_bytes: state.uploads.max_bytes(),
    })
}

/// GET `/api/admin/notifications` — unexpired messages, oldest first.
pub async fn notifications(_auth: AuthUser, State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifications.recent())
}

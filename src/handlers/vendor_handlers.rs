//! Vendor inquiry submission and review.

use crate::{
    errors::AppError,
    extractors::auth::AuthUser,
    models::vendor::{VendorInquiry, VendorInquiryInput},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// POST `/api/vendors/inquiries`
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(input): Json<VendorInquiryInput>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(event_id) = input.event_id {
        if state.events.get_event(event_id).await.is_none() {
            return Err(AppError::bad_request(format!(
                "event `{}` does not exist",
                event_id
            )));
        }
    }

    let inquiry = state.vendors.submit(input).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// GET `/api/admin/vendors/inquiries`
pub async fn list_inquiries(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<VendorInquiry>>, AppError> {
    auth.require_admin()?;
    Ok(Json(state.vendors.list().await))
}

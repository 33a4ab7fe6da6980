//! Sign-in, sign-out and current identity.

use crate::{errors::AppError, extractors::auth::AuthUser, models::user::User, state::AppState};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResp {
    pub token: String,
    pub user: User,
}

/// POST `/api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginResp>, AppError> {
    let session = state.sessions.login(&req.email, &req.password).await?;
    Ok(Json(LoginResp {
        token: session.token,
        user: session.user,
    }))
}

/// POST `/api/auth/logout` — clears the caller's identity.
pub async fn logout(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.sessions.logout(&auth.token).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/api/auth/me`
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

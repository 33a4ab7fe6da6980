use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{errors::AppError, models::user::User, state::AppState};

/// Signed-in user extracted from the `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require a session. Role checks happen
/// via `require_admin()` in the handler body.
pub struct AuthUser {
    pub token: String,
    pub user: User,
}

impl AuthUser {
    /// Returns `Ok(())` for the administrator, `403` for anyone else.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.user.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator access required"))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        let user = state
            .sessions
            .current_user(token)
            .await
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        Ok(AuthUser {
            token: token.to_string(),
            user,
        })
    }
}

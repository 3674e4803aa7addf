use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Extractor for the authenticated user behind `Authorization: Bearer <token>`.
///
/// Verifies the token, then loads the user row so handlers always see current
/// data (a token outlives profile edits). Missing/invalid/expired tokens and
/// deactivated or deleted users all reject with a generic 401.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = state
            .tokens
            .verify(token)
            .map_err(|_| AppError::Unauthorized)?;
        let user_id: i64 = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;

        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&state.db)
            .await?;

        let user = user.filter(|u| u.is_active).ok_or(AppError::Unauthorized)?;
        Ok(CurrentUser(user))
    }
}

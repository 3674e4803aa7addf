use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::extract::CurrentUser;
use crate::errors::AppError;
use crate::models::user::{User, UserProfile};
use crate::state::AppState;
use crate::users::LANGUAGES;

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub language_preference: Option<String>,
}

/// GET /api/v1/users/profile
pub async fn handle_get_profile(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(user.into())
}

/// PUT /api/v1/users/profile
/// Partial update: absent fields keep their stored values.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, AppError> {
    if let Some(name) = req.name.as_deref() {
        let len = name.trim().chars().count();
        if !(2..=100).contains(&len) {
            return Err(AppError::Validation(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }
    }
    if let Some(lang) = req.language_preference.as_deref() {
        if !LANGUAGES.contains(&lang) {
            return Err(AppError::Validation(format!(
                "Language must be one of: {}",
                LANGUAGES.join(", ")
            )));
        }
    }

    let updated: User = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($1, name),
            language_preference = COALESCE($2, language_preference),
            updated_at = now()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.language_preference.as_deref())
    .bind(user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/v1/users/account
/// Hard delete; the analysis history goes with the row via FK cascade.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, AppError> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&state.db)
        .await?;

    info!("Deleted account {} ({})", user.id, user.email);
    Ok(StatusCode::NO_CONTENT)
}

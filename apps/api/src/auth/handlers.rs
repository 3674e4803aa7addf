use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::extract::CurrentUser;
use crate::auth::service::{self, NewUser};
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_language")]
    pub language_preference: String,
}

fn default_language() -> String {
    "English".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Session token plus the user it belongs to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserProfile,
}

/// POST /api/v1/auth/register
/// Registration logs the user straight in, so the response carries a token.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = service::register(
        &state.db,
        NewUser {
            name: &req.name,
            email: &req.email,
            password: &req.password,
            language_preference: &req.language_preference,
        },
    )
    .await?;

    let issued = state
        .tokens
        .issue(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token: issued.access_token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
            user: user.into(),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = service::login(&state.db, &req.email, &req.password).await?;

    let issued = state
        .tokens
        .issue(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(AuthResponse {
        access_token: issued.access_token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
        user: user.into(),
    }))
}

/// GET /api/v1/auth/me
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(user.into())
}

/// POST /api/v1/auth/change-password
pub async fn handle_change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<PasswordChangeRequest>,
) -> Result<StatusCode, AppError> {
    service::change_password(&state.db, &user, &req.current_password, &req.new_password).await?;
    Ok(StatusCode::NO_CONTENT)
}

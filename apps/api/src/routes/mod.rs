pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::{analysis, auth, users};

async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    // Body limit sits above the configured file cap so the handler's own
    // size check produces the 413, with the limit as a hard backstop.
    let body_limit = DefaultBodyLimit::max(state.config.max_file_size + 64 * 1024);

    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handlers::handle_register))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .route("/api/v1/auth/me", get(auth::handlers::handle_me))
        .route(
            "/api/v1/auth/change-password",
            post(auth::handlers::handle_change_password),
        )
        // Users
        .route(
            "/api/v1/users/profile",
            get(users::handlers::handle_get_profile).put(users::handlers::handle_update_profile),
        )
        .route(
            "/api/v1/users/account",
            delete(users::handlers::handle_delete_account),
        )
        // Analysis
        .route(
            "/api/v1/analysis/text",
            post(analysis::handlers::handle_analyze_text),
        )
        .route(
            "/api/v1/analysis/file",
            post(analysis::handlers::handle_analyze_file),
        )
        .route(
            "/api/v1/analysis/history",
            get(analysis::handlers::handle_history),
        )
        .fallback(not_found)
        .layer(body_limit)
        .with_state(state)
}

use sqlx::PgPool;

use crate::auth::token::TokenSigner;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenSigner,
    pub config: Config,
}

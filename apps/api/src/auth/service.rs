use sqlx::PgPool;
use tracing::info;

use crate::auth::password;
use crate::errors::{on_unique_violation, AppError};
use crate::models::user::User;
use crate::users::LANGUAGES;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub language_preference: &'a str,
}

/// Registers a new user: field validation, password policy, duplicate-email
/// check, bcrypt hash, insert. Email is lowercased before storage so
/// uniqueness is case-insensitive.
pub async fn register(pool: &PgPool, new_user: NewUser<'_>) -> Result<User, AppError> {
    let name = new_user.name.trim();
    if name.chars().count() < 2 || name.chars().count() > 100 {
        return Err(AppError::Validation(
            "Name must be between 2 and 100 characters".to_string(),
        ));
    }
    let email = new_user.email.trim().to_lowercase();
    if !email.contains('@') || email.len() > 255 {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if !LANGUAGES.contains(&new_user.language_preference) {
        return Err(AppError::Validation(format!(
            "Language must be one of: {}",
            LANGUAGES.join(", ")
        )));
    }
    password::validate_strength(new_user.password).map_err(AppError::Validation)?;

    let duplicate_email = || AppError::Conflict("User with this email already exists".to_string());

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(duplicate_email());
    }

    let password_hash = password::hash(new_user.password)?;

    // The unique index still backstops a concurrent registration racing the
    // SELECT above; 23505 is translated to the same conflict error.
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password_hash, language_preference)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(&email)
    .bind(&password_hash)
    .bind(new_user.language_preference)
    .fetch_one(pool)
    .await
    .map_err(|e| on_unique_violation(e, duplicate_email()))?;

    info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Validates credentials for login. Unknown email, deactivated account, and
/// password mismatch are indistinguishable to the caller.
pub async fn login(pool: &PgPool, email: &str, pass: &str) -> Result<User, AppError> {
    let email = email.trim().to_lowercase();
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?;

    let user = user.filter(|u| u.is_active).ok_or(AppError::Unauthorized)?;
    if !password::verify(pass, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }
    Ok(user)
}

/// Changes a user's password. The stored hash is only replaced once the
/// current password verifies and the new one passes the policy.
pub async fn change_password(
    pool: &PgPool,
    user: &User,
    current: &str,
    new: &str,
) -> Result<(), AppError> {
    if !password::verify(current, &user.password_hash)? {
        return Err(AppError::Validation(
            "Current password is incorrect".to_string(),
        ));
    }
    password::validate_strength(new).map_err(AppError::Validation)?;
    if password::verify(new, &user.password_hash)? {
        return Err(AppError::Validation(
            "New password must be different from current password".to_string(),
        ));
    }

    let password_hash = password::hash(new)?;
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2")
        .bind(&password_hash)
        .bind(user.id)
        .execute(pool)
        .await?;

    info!("Password changed for user {}", user.id);
    Ok(())
}

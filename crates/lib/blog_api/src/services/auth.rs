//! Authentication service: registration, login and password change flows
//! delegating to `blog_core::auth`.

use blog_core::auth::AuthError;
use blog_core::auth::authenticator::authenticate;
use blog_core::auth::guard::issue_token_for;
use blog_core::auth::jwt::TokenCodec;
use blog_core::auth::password::hash_password_with_cost;
use blog_core::auth::queries;
use blog_core::models::auth::Identity;
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AccessTokenResponse, UpdateUserRequest, UserResponse};

/// Reject blank logins and empty passwords before touching the database.
fn validate_credentials(login: &str, password: &str) -> AppResult<()> {
    if login.trim().is_empty() {
        return Err(AppError::Validation("Login must not be empty".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Register a new user account.
pub async fn register(
    pool: &PgPool,
    login: &str,
    password: &str,
    bcrypt_cost: u32,
) -> AppResult<UserResponse> {
    validate_credentials(login, password)?;

    if queries::login_exists(pool, login).await? {
        return Err(AppError::Validation("User already exists".into()));
    }

    let pw_hash = hash_password_with_cost(password, bcrypt_cost)?;
    let identity = queries::create_user(pool, login, &pw_hash).await?;

    info!(login, user_id = identity.id, "user registered");
    Ok(identity.into())
}

/// Authenticate with login + password and issue an access token.
///
/// Unknown logins and wrong passwords produce the same error.
pub async fn login(
    pool: &PgPool,
    tokens: &TokenCodec,
    login: &str,
    password: &str,
) -> AppResult<AccessTokenResponse> {
    let identity = authenticate(pool, login, password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let access_token = issue_token_for(tokens, &identity.login)?;

    info!(login, user_id = identity.id, "user authenticated");
    Ok(AccessTokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: tokens.default_ttl().num_seconds(),
    })
}

/// Apply a partial update to the caller's account.
///
/// Only the password can change; an absent password leaves the account
/// untouched. Already issued tokens stay valid until they expire.
pub async fn update_user(
    pool: &PgPool,
    identity: Identity,
    update: UpdateUserRequest,
    bcrypt_cost: u32,
) -> AppResult<UserResponse> {
    let Some(password) = update.password else {
        return Ok(identity.into());
    };
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }

    let pw_hash = hash_password_with_cost(&password, bcrypt_cost)?;
    let updated = queries::update_password_hash(pool, identity.id, &pw_hash)
        .await?
        .ok_or(AppError::InvalidToken)?;

    info!(user_id = updated.id, "password changed");
    Ok(updated.into())
}

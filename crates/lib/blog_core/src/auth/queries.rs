//! Auth-related database queries.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AuthError, CredentialStore};
use crate::models::auth::{Credential, Identity};

/// Fetch the stored credential for a login.
pub async fn find_credential_by_login(
    pool: &PgPool,
    login: &str,
) -> Result<Option<Credential>, AuthError> {
    let row = sqlx::query_as::<_, Credential>(
        "SELECT id, login, password_hash FROM users WHERE login = $1",
    )
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch the identity (id + login) for a login.
pub async fn find_identity_by_login(
    pool: &PgPool,
    login: &str,
) -> Result<Option<Identity>, AuthError> {
    let row = sqlx::query_as::<_, Identity>("SELECT id, login FROM users WHERE login = $1")
        .bind(login)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Check whether a login is already registered.
pub async fn login_exists(pool: &PgPool, login: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE login = $1)")
            .bind(login)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a new user, returning its identity.
///
/// A concurrent registration of the same login surfaces as a validation
/// error rather than a database error.
pub async fn create_user(
    pool: &PgPool,
    login: &str,
    password_hash: &str,
) -> Result<Identity, AuthError> {
    sqlx::query_as::<_, Identity>(
        "INSERT INTO users (login, password_hash) VALUES ($1, $2) RETURNING id, login",
    )
    .bind(login)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            AuthError::ValidationError("User already exists".into())
        }
        _ => AuthError::DbError(e),
    })
}

/// Replace a user's password hash. The login itself is immutable.
pub async fn update_password_hash(
    pool: &PgPool,
    user_id: i64,
    password_hash: &str,
) -> Result<Option<Identity>, AuthError> {
    let row = sqlx::query_as::<_, Identity>(
        "UPDATE users SET password_hash = $1 WHERE id = $2 RETURNING id, login",
    )
    .bind(password_hash)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[async_trait]
impl CredentialStore for PgPool {
    async fn credential_by_login(&self, login: &str) -> Result<Option<Credential>, AuthError> {
        find_credential_by_login(self, login).await
    }

    async fn identity_by_login(&self, login: &str) -> Result<Option<Identity>, AuthError> {
        find_identity_by_login(self, login).await
    }
}

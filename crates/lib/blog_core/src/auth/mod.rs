//! Authentication and authorization logic.
//!
//! Provides password hashing, JWT issuance and verification, credential
//! checks and token-to-identity resolution shared by `blog_api` handlers.

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod queries;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{Credential, Identity};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unknown token subject: {0}")]
    UnknownSubject(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<jwt::TokenError> for AuthError {
    fn from(e: jwt::TokenError) -> Self {
        match e {
            jwt::TokenError::Expired => AuthError::TokenExpired,
            jwt::TokenError::Invalid => AuthError::TokenInvalid,
            jwt::TokenError::Encode(msg) => AuthError::Internal(msg),
        }
    }
}

/// User lookup capability consumed by the auth core.
///
/// Lookups are exact and case-sensitive on `login`. Implemented for
/// `sqlx::PgPool` in [`queries`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the stored credential for `login`.
    async fn credential_by_login(&self, login: &str) -> Result<Option<Credential>, AuthError>;

    /// Fetch the public identity for `login`.
    async fn identity_by_login(&self, login: &str) -> Result<Option<Identity>, AuthError>;
}

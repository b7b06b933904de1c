//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! shapes in `blog_api::models`.

use serde::{Deserialize, Serialize};

/// Authenticated principal, resolved fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Identity {
    pub id: i64,
    pub login: String,
}

/// Stored login credential (for internal auth flows only).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub login: String,
    pub password_hash: String,
}

impl Credential {
    /// The identity this credential authenticates.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            login: self.login.clone(),
        }
    }
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user login (standard JWT `sub` claim).
    pub sub: String,
    /// Expiry (unix timestamp, seconds).
    pub exp: i64,
    /// Issued at (unix timestamp, seconds).
    pub iat: i64,
}

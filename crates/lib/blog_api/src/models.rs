//! Request and response bodies.

use blog_core::models::auth::Identity;
use blog_core::models::post::PostRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Body of `POST /api/v1/users/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
}

/// Body of `POST /api/v1/users/auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Body of `PATCH /api/v1/users/me`. Omitted or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            login: identity.login,
        }
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Body of `POST /api/v1/posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Body of `PATCH /api/v1/posts/{id}`. Omitted or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Public view of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// `GET /ping` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

//! Blog post domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row returned by post queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Partial update; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

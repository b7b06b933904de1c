//! Blog post persistence.
//!
//! Mutations are scoped to the author: a post owned by someone else behaves
//! exactly like a missing one.

use sqlx::PgPool;

use crate::models::post::{NewPost, PostPatch, PostRow};

/// List all posts, oldest first.
pub async fn list_posts(pool: &PgPool) -> Result<Vec<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, title, content, created_at, updated_at
        FROM posts
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Get a post by ID.
pub async fn get_post(pool: &PgPool, post_id: i64) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, user_id, title, content, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Create a post authored by `user_id`.
pub async fn create_post(
    pool: &PgPool,
    user_id: i64,
    post: &NewPost,
) -> Result<PostRow, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (user_id, title, content)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, title, content, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(&post.title)
    .bind(&post.content)
    .fetch_one(pool)
    .await
}

/// Apply a partial update to one of `user_id`'s posts.
///
/// Absent fields keep their stored value; `updated_at` is always bumped.
/// Returns `None` when no such post belongs to the user.
pub async fn update_post(
    pool: &PgPool,
    user_id: i64,
    post_id: i64,
    patch: &PostPatch,
) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET title = COALESCE($1, title),
            content = COALESCE($2, content),
            updated_at = now()
        WHERE id = $3 AND user_id = $4
        RETURNING id, user_id, title, content, created_at, updated_at
        "#,
    )
    .bind(patch.title.as_deref())
    .bind(patch.content.as_deref())
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Delete one of `user_id`'s posts, returning the removed row.
pub async fn delete_post(
    pool: &PgPool,
    user_id: i64,
    post_id: i64,
) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        DELETE FROM posts
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, content, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

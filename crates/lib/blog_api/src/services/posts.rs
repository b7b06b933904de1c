//! Post service: validation and not-found mapping over `blog_core::posts`.

use blog_core::models::auth::Identity;
use blog_core::models::post::{NewPost, PostPatch};
use blog_core::posts;
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{CreatePostRequest, PostResponse, UpdatePostRequest};

fn not_found(post_id: i64) -> AppError {
    AppError::NotFound(format!("Post(id={post_id}) not found"))
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// List every post.
pub async fn list(pool: &PgPool) -> AppResult<Vec<PostResponse>> {
    let rows = posts::list_posts(pool).await?;
    Ok(rows.into_iter().map(PostResponse::from).collect())
}

/// Fetch one post.
pub async fn get(pool: &PgPool, post_id: i64) -> AppResult<PostResponse> {
    posts::get_post(pool, post_id)
        .await?
        .map(PostResponse::from)
        .ok_or_else(|| not_found(post_id))
}

/// Create a post authored by the caller.
pub async fn create(
    pool: &PgPool,
    author: &Identity,
    body: CreatePostRequest,
) -> AppResult<PostResponse> {
    require_text("title", &body.title)?;
    require_text("content", &body.content)?;

    let row = posts::create_post(
        pool,
        author.id,
        &NewPost {
            title: body.title,
            content: body.content,
        },
    )
    .await?;

    info!(post_id = row.id, user_id = author.id, "post created");
    Ok(row.into())
}

/// Partially update one of the caller's posts.
pub async fn update(
    pool: &PgPool,
    author: &Identity,
    post_id: i64,
    body: UpdatePostRequest,
) -> AppResult<PostResponse> {
    if let Some(title) = &body.title {
        require_text("title", title)?;
    }
    if let Some(content) = &body.content {
        require_text("content", content)?;
    }

    let patch = PostPatch {
        title: body.title,
        content: body.content,
    };
    posts::update_post(pool, author.id, post_id, &patch)
        .await?
        .map(PostResponse::from)
        .ok_or_else(|| not_found(post_id))
}

/// Delete one of the caller's posts, returning it.
pub async fn delete(pool: &PgPool, author: &Identity, post_id: i64) -> AppResult<PostResponse> {
    let row = posts::delete_post(pool, author.id, post_id)
        .await?
        .ok_or_else(|| not_found(post_id))?;

    info!(post_id, user_id = author.id, "post deleted");
    Ok(row.into())
}

//! Blog post request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::services::posts;

/// `GET /api/v1/posts`: list all posts.
pub async fn list_posts_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostResponse>>> {
    Ok(Json(posts::list(&state.pool).await?))
}

/// `GET /api/v1/posts/{id}`: fetch one post.
pub async fn get_post_handler(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<i64>,
) -> AppResult<Json<PostResponse>> {
    Ok(Json(posts::get(&state.pool, post_id).await?))
}

/// `POST /api/v1/posts`: publish a post as the caller.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(author)): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<PostResponse>)> {
    let post = posts::create(&state.pool, &author, body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `PATCH /api/v1/posts/{id}`: partially update one of the caller's posts.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(author)): Extension<AuthenticatedUser>,
    AppPath(post_id): AppPath<i64>,
    AppJson(body): AppJson<UpdatePostRequest>,
) -> AppResult<Json<PostResponse>> {
    Ok(Json(posts::update(&state.pool, &author, post_id, body).await?))
}

/// `DELETE /api/v1/posts/{id}`: delete one of the caller's posts.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(author)): Extension<AuthenticatedUser>,
    AppPath(post_id): AppPath<i64>,
) -> AppResult<Json<PostResponse>> {
    Ok(Json(posts::delete(&state.pool, &author, post_id).await?))
}

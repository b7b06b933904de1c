//! User account request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    AccessTokenResponse, LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse,
};
use crate::services::auth;

/// `POST /api/v1/users/register`: create a new user account.
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = auth::register(
        &state.pool,
        &body.login,
        &body.password,
        state.config.bcrypt_cost,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/v1/users/auth`: authenticate with login + password.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let resp = auth::login(&state.pool, &state.tokens, &body.login, &body.password).await?;
    Ok(Json(resp))
}

/// `GET /api/v1/users/me`: the identity behind the presented token.
pub async fn me_handler(
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
) -> Json<UserResponse> {
    Json(identity.into())
}

/// `PATCH /api/v1/users/me`: change the caller's password.
pub async fn update_me_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    AppJson(body): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = auth::update_user(&state.pool, identity, body, state.config.bcrypt_cost).await?;
    Ok(Json(user))
}

//! Authentication middleware: Bearer token extraction and identity resolution.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use blog_core::auth::guard::resolve_identity;
use blog_core::models::auth::Identity;

use crate::AppState;
use crate::error::AppError;

/// Identity resolved for the current request, stored in request extensions.
///
/// Protected handlers take it as an explicit `Extension<AuthenticatedUser>`
/// argument.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Axum middleware: extracts `Authorization: Bearer <token>`, resolves the
/// token to an identity, and injects `AuthenticatedUser` into request
/// extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

    let identity = resolve_identity(&state.tokens, &state.pool, token).await?;

    request.extensions_mut().insert(AuthenticatedUser(identity));

    Ok(next.run(request).await)
}

/// Extract the credentials of a `Bearer` authorization header.
///
/// The scheme is matched case-insensitively; an empty token is treated as
/// no token at all.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

//! Authenticated liveness check.

use axum::{Extension, Json};

use crate::middleware::auth::AuthenticatedUser;
use crate::models::PingResponse;

/// `GET /ping`: answers only callers holding a valid token.
pub async fn ping_handler(Extension(_user): Extension<AuthenticatedUser>) -> Json<PingResponse> {
    Json(PingResponse {
        message: "Pong".to_string(),
    })
}

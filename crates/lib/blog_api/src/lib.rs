//! # blog_api
//!
//! HTTP API library for the blog backend.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use axum::routing::{get, patch, post};
use blog_core::auth::jwt::{MAX_TOKEN_TTL_SECS, TokenCodec};
use chrono::Duration;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{ping, posts, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Access token codec, keyed with `config.jwt_secret`.
    pub tokens: TokenCodec,
}

impl AppState {
    /// Build state from a pool and configuration, deriving the token codec.
    ///
    /// The token lifetime is clamped to `1..=MAX_TOKEN_TTL_SECS` seconds.
    pub fn new(pool: PgPool, config: ApiConfig) -> Self {
        let ttl_secs = config.access_token_ttl_secs.clamp(1, MAX_TOKEN_TTL_SECS);
        let tokens = TokenCodec::new(config.jwt_secret.as_bytes())
            .with_default_ttl(Duration::seconds(ttl_secs));
        Self {
            pool,
            config,
            tokens,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `blog_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    blog_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::POST_USERS_REGISTER, post(users::register_handler))
        .route(routes::POST_USERS_AUTH, post(users::login_handler))
        .route(routes::POSTS, get(posts::list_posts_handler))
        .route(routes::POSTS_ID, get(posts::get_post_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_PING, get(ping::ping_handler))
        .route(
            routes::USERS_ME,
            get(users::me_handler).patch(users::update_me_handler),
        )
        .route(routes::POSTS, post(posts::create_post_handler))
        .route(
            routes::POSTS_ID,
            patch(posts::update_post_handler).delete(posts::delete_post_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}

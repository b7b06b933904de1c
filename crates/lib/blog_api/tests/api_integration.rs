//! End-to-end flow against a real PostgreSQL database.
//!
//! Runs only when `TEST_DATABASE_URL` points at a disposable database; the
//! schema is migrated in place and rows are created with unique logins.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use blog_api::{AppState, config::ApiConfig};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

fn config(url: &str, ttl_secs: i64) -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        pg_connection_url: url.into(),
        jwt_secret: "integration-secret".into(),
        access_token_ttl_secs: ttl_secs,
        bcrypt_cost: 4,
    }
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn login(app: &Router, login: &str, password: &str) -> String {
    let (status, body) = call(
        app,
        "POST",
        "/api/v1/users/auth",
        None,
        Some(json!({"login": login, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().expect("token").to_string()
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

#[tokio::test]
async fn users_posts_and_tokens_against_database() {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping database integration test");
        return;
    };

    let pool = PgPool::connect(&url).await.expect("connect");
    blog_api::migrate(&pool).await.expect("migrate");
    let app = blog_api::router(AppState::new(pool.clone(), config(&url, 900)));

    let suffix = unique_suffix();
    let alice = format!("alice-{suffix}");
    let mallory = format!("mallory-{suffix}");

    // Registration.
    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/users/register",
        None,
        Some(json!({"login": alice, "password": "password"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["login"], alice.as_str());
    let alice_id = body["id"].as_i64().expect("id");

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/users/register",
        None,
        Some(json!({"login": alice, "password": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wrong password and unknown login look the same.
    let (wrong_pw_status, wrong_pw_body) = call(
        &app,
        "POST",
        "/api/v1/users/auth",
        None,
        Some(json!({"login": alice, "password": "wrong_password"})),
    )
    .await;
    let (unknown_status, unknown_body) = call(
        &app,
        "POST",
        "/api/v1/users/auth",
        None,
        Some(json!({"login": format!("nobody-{suffix}"), "password": "password"})),
    )
    .await;
    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, wrong_pw_status);
    assert_eq!(unknown_body, wrong_pw_body);

    // Token resolves to the caller.
    let token = login(&app, &alice, "password").await;
    let (status, body) = call(&app, "GET", "/ping", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Pong"}));

    let (status, body) = call(&app, "GET", "/api/v1/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": alice_id, "login": alice}));

    // Posts.
    let (status, post) = call(
        &app,
        "POST",
        "/api/v1/posts",
        Some(&token),
        Some(json!({"title": "First", "content": "Hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["user_id"], alice_id);
    let post_id = post["id"].as_i64().expect("post id");
    let post_uri = format!("/api/v1/posts/{post_id}");

    let (status, fetched) = call(&app, "GET", &post_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "First");

    let (status, listed) = call(&app, "GET", "/api/v1/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        listed
            .as_array()
            .expect("array")
            .iter()
            .any(|p| p["id"] == post_id)
    );

    let (status, patched) = call(
        &app,
        "PATCH",
        &post_uri,
        Some(&token),
        Some(json!({"title": "Renamed", "content": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], "Renamed");
    assert_eq!(patched["content"], "Hello");

    // Someone else's post behaves like a missing one.
    call(
        &app,
        "POST",
        "/api/v1/users/register",
        None,
        Some(json!({"login": mallory, "password": "password"})),
    )
    .await;
    let mallory_token = login(&app, &mallory, "password").await;
    let (status, _) = call(&app, "DELETE", &post_uri, Some(&mallory_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, deleted) = call(&app, "DELETE", &post_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], post_id);

    let (status, body) = call(&app, "GET", &post_uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Post(id={post_id}) not found"));

    // Password change: empty patch is a no-op, then the new password works.
    let (status, _) = call(&app, "PATCH", "/api/v1/users/me", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    login(&app, &alice, "password").await;

    let (status, _) = call(
        &app,
        "PATCH",
        "/api/v1/users/me",
        Some(&token),
        Some(json!({"password": "new-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    login(&app, &alice, "new-password").await;

    // Removed account: its token no longer resolves.
    sqlx::query("DELETE FROM users WHERE login = $1")
        .bind(&mallory)
        .execute(&pool)
        .await
        .expect("delete mallory");
    let (status, body) = call(&app, "GET", "/ping", Some(&mallory_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");

    // Short-lived tokens expire.
    let short = blog_api::router(AppState::new(pool.clone(), config(&url, 1)));
    let token = login(&short, &alice, "new-password").await;
    let (status, _) = call(&short, "GET", "/ping", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let (status, body) = call(&short, "GET", "/ping", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "token_expired");

    pool.close().await;
}

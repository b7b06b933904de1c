//! # blog_core
//!
//! Core domain logic for the blog backend: authentication, users and posts.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod posts;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

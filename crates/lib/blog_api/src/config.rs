//! API server configuration.

use blog_core::auth::jwt::{DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, resolve_jwt_secret};
use blog_core::auth::password::{BCRYPT_COST_RANGE, DEFAULT_BCRYPT_COST};
use tracing::warn;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Lifetime of issued access tokens, in seconds.
    pub access_token_ttl_secs: i64,
    /// bcrypt cost factor for newly hashed passwords.
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                      | Default                             |
    /// |-------------------------------|-------------------------------------|
    /// | `BIND_ADDR`                   | `127.0.0.1:3100`                    |
    /// | `DATABASE_URL`                | `postgres://localhost:5432/blog`    |
    /// | `JWT_SECRET` / `SECRET_KEY`   | generated & persisted to file       |
    /// | `ACCESS_TOKEN_EXPIRE_SECONDS` | `900`, capped at one year           |
    /// | `BCRYPT_COST`                 | `10`, must be within 4..=31         |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/blog".into()),
            jwt_secret: resolve_jwt_secret(),
            access_token_ttl_secs: token_ttl_secs(env_parse("ACCESS_TOKEN_EXPIRE_SECONDS")),
            bcrypt_cost: bcrypt_cost(env_parse("BCRYPT_COST")),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Non-positive lifetimes fall back to the default; long ones are capped.
fn token_ttl_secs(raw: Option<i64>) -> i64 {
    match raw {
        None => DEFAULT_TOKEN_TTL_SECS,
        Some(secs) if secs <= 0 => {
            warn!(secs, "ACCESS_TOKEN_EXPIRE_SECONDS must be positive, using default");
            DEFAULT_TOKEN_TTL_SECS
        }
        Some(secs) if secs > MAX_TOKEN_TTL_SECS => {
            warn!(
                secs,
                max = MAX_TOKEN_TTL_SECS,
                "ACCESS_TOKEN_EXPIRE_SECONDS too large, capping"
            );
            MAX_TOKEN_TTL_SECS
        }
        Some(secs) => secs,
    }
}

fn bcrypt_cost(raw: Option<u32>) -> u32 {
    match raw {
        None => DEFAULT_BCRYPT_COST,
        Some(cost) if BCRYPT_COST_RANGE.contains(&cost) => cost,
        Some(cost) => {
            warn!(cost, "BCRYPT_COST outside 4..=31, using default");
            DEFAULT_BCRYPT_COST
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_defaults_when_unset_or_not_positive() {
        assert_eq!(token_ttl_secs(None), DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(token_ttl_secs(Some(0)), DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(token_ttl_secs(Some(-30)), DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(token_ttl_secs(Some(60)), 60);
    }

    #[test]
    fn token_ttl_is_capped() {
        assert_eq!(token_ttl_secs(Some(10_000_000_000_000)), MAX_TOKEN_TTL_SECS);
        assert_eq!(token_ttl_secs(Some(i64::MAX)), MAX_TOKEN_TTL_SECS);
        assert_eq!(token_ttl_secs(Some(MAX_TOKEN_TTL_SECS)), MAX_TOKEN_TTL_SECS);
    }

    #[test]
    fn bcrypt_cost_outside_range_falls_back() {
        assert_eq!(bcrypt_cost(None), DEFAULT_BCRYPT_COST);
        assert_eq!(bcrypt_cost(Some(3)), DEFAULT_BCRYPT_COST);
        assert_eq!(bcrypt_cost(Some(32)), DEFAULT_BCRYPT_COST);
        assert_eq!(bcrypt_cost(Some(4)), 4);
        assert_eq!(bcrypt_cost(Some(31)), 31);
    }
}

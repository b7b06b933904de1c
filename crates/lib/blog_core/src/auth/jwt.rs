//! JWT token generation and verification.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::auth::TokenClaims;

/// Access token lifetime when none is configured: 15 minutes.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Longest access token lifetime accepted from configuration: one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Outcome of a failed decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature verified but `now >= exp`.
    #[error("token expired")]
    Expired,

    /// Bad signature, malformed structure or missing subject.
    #[error("invalid token")]
    Invalid,

    #[error("jwt encode: {0}")]
    Encode(String),
}

/// Issues and verifies HS256 access tokens with a process-wide secret.
///
/// The secret is fixed at construction; a codec built from a different
/// secret rejects every token issued by this one.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec signing with `secret` and the default 15 minute TTL.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `decode_at` so that `now == exp` counts as expired.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            default_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Override the TTL used when `issue` is called without one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// TTL applied when `issue` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for `subject` expiring `ttl` (or the default TTL) from now.
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Sign a token as if issued at `now`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encode(format!("token lifetime {ttl} out of range")))?;
        let claims = TokenClaims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify a token against the current time.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Verify a token's signature, then its subject and expiry relative to `now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                debug!("jwt rejected: {e}");
                TokenError::Invalid
            })?
            .claims;

        if claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }
        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `SECRET_KEY` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("SECRET_KEY")
        && !secret.is_empty()
    {
        return secret;
    }
    load_or_create_secret(&jwt_secret_path())
}

/// Read the secret stored at `path`, generating and persisting one if absent.
///
/// A secret that cannot be persisted is still returned; it then lives only
/// for this process and tokens will not survive a restart.
pub fn load_or_create_secret(path: &Path) -> String {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %parent.display(), "could not create JWT secret directory: {e}");
    }
    match std::fs::write(path, &secret) {
        Ok(()) => info!(path = %path.display(), "generated new JWT secret"),
        Err(e) => warn!(path = %path.display(), "could not persist JWT secret: {e}"),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blog")
        .join("jwt-secret")
}

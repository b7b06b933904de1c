//! Session guard: turns a presented bearer token into an [`Identity`].
//!
//! The token is the session: nothing is cached between requests, so every
//! call decodes the token and looks the subject up again.

use tracing::debug;

use super::jwt::{TokenCodec, TokenError};
use super::{AuthError, CredentialStore};
use crate::models::auth::Identity;

/// Resolve the identity behind `token`.
///
/// Fails with [`AuthError::TokenInvalid`] for a bad signature or malformed
/// token, [`AuthError::TokenExpired`] for a correctly signed token past its
/// expiry, and [`AuthError::UnknownSubject`] when the subject no longer
/// exists. Store failures propagate unchanged.
pub async fn resolve_identity<S>(
    codec: &TokenCodec,
    store: &S,
    token: &str,
) -> Result<Identity, AuthError>
where
    S: CredentialStore + ?Sized,
{
    let claims = codec.decode(token).map_err(|e| {
        match e {
            TokenError::Expired => debug!("session guard: token expired"),
            _ => debug!("session guard: token rejected"),
        }
        AuthError::from(e)
    })?;

    match store.identity_by_login(&claims.sub).await? {
        Some(identity) => Ok(identity),
        None => {
            debug!(subject = %claims.sub, "session guard: subject not found");
            Err(AuthError::UnknownSubject(claims.sub))
        }
    }
}

/// Issue an access token for `login` using the codec's configured TTL.
pub fn issue_token_for(codec: &TokenCodec, login: &str) -> Result<String, AuthError> {
    codec.issue(login, None).map_err(AuthError::from)
}

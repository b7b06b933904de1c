//! Login/password verification.

use tracing::debug;

use super::{AuthError, CredentialStore, password};
use crate::models::auth::Identity;

/// Check `login` + `password` against the stored credential.
///
/// Returns `Ok(None)` both for an unknown login and for a wrong password so
/// callers cannot tell the two apart. Store failures are returned as errors.
pub async fn authenticate<S>(
    store: &S,
    login: &str,
    password: &str,
) -> Result<Option<Identity>, AuthError>
where
    S: CredentialStore + ?Sized,
{
    let Some(credential) = store.credential_by_login(login).await? else {
        debug!(login, "authentication failed");
        return Ok(None);
    };

    if !password::verify_password(password, &credential.password_hash) {
        debug!(login, "authentication failed");
        return Ok(None);
    }

    Ok(Some(credential.identity()))
}

//! In-memory `CredentialStore` for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{AuthError, CredentialStore, password};
use crate::models::auth::{Credential, Identity};

pub(crate) struct MemoryStore {
    users: HashMap<String, Credential>,
    failing: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            users: HashMap::new(),
            failing: false,
        }
    }

    /// A store whose every lookup fails.
    pub(crate) fn failing() -> Self {
        Self {
            users: HashMap::new(),
            failing: true,
        }
    }

    pub(crate) fn with_user(self, login: &str, plaintext: &str) -> Self {
        let hash = password::hash_password_with_cost(plaintext, 4).expect("bcrypt hash");
        self.with_raw_hash(login, &hash)
    }

    pub(crate) fn with_raw_hash(mut self, login: &str, hash: &str) -> Self {
        let id = self.users.len() as i64 + 1;
        self.users.insert(
            login.to_string(),
            Credential {
                id,
                login: login.to_string(),
                password_hash: hash.to_string(),
            },
        );
        self
    }

    fn check(&self) -> Result<(), AuthError> {
        if self.failing {
            return Err(AuthError::Internal("store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn credential_by_login(&self, login: &str) -> Result<Option<Credential>, AuthError> {
        self.check()?;
        Ok(self.users.get(login).cloned())
    }

    async fn identity_by_login(&self, login: &str) -> Result<Option<Identity>, AuthError> {
        self.check()?;
        Ok(self.users.get(login).map(Credential::identity))
    }
}

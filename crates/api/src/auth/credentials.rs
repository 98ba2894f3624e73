//! User/password checkers consulted by the token authority on login.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::auth::password::{is_phc_hash, verify_password};

/// A login attempt. Exists only for the duration of the request.
#[derive(Clone, Deserialize)]
pub struct Credential {
    #[serde(alias = "User")]
    pub user: String,
    #[serde(alias = "Password")]
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Decides whether a user/password pair is genuine.
pub trait CredentialChecker: Send + Sync {
    fn validate_user(&self, user: &str, password: &str) -> bool;
}

/// Placeholder checker: a user authenticates with their own name as password.
///
/// Only suitable for local development. Selected when `AUTH_USERS` is unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorCredentials;

impl CredentialChecker for MirrorCredentials {
    fn validate_user(&self, user: &str, password: &str) -> bool {
        user == password
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("entry {0} is not in `user:hash` form")]
    MalformedEntry(usize),

    #[error("entry for user {0} does not hold a PHC password hash")]
    InvalidHash(String),
}

/// Fixed set of users with Argon2id password hashes.
///
/// Parsed from `user:phc-hash` entries separated by `;`.
#[derive(Clone)]
pub struct HashedCredentials {
    users: HashMap<String, String>,
}

impl HashedCredentials {
    pub fn parse(entries: &str) -> Result<Self, CredentialsError> {
        let mut users = HashMap::new();
        for (index, entry) in entries
            .split(';')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .enumerate()
        {
            let (user, hash) = entry
                .split_once(':')
                .filter(|(user, _)| !user.is_empty())
                .ok_or(CredentialsError::MalformedEntry(index))?;
            if !is_phc_hash(hash) {
                return Err(CredentialsError::InvalidHash(user.to_string()));
            }
            users.insert(user.to_string(), hash.to_string());
        }
        Ok(Self { users })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl fmt::Debug for HashedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedCredentials")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialChecker for HashedCredentials {
    fn validate_user(&self, user: &str, password: &str) -> bool {
        let Some(hash) = self.users.get(user) else {
            return false;
        };
        match verify_password(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(user, error = %e, "Stored password hash could not be verified");
                false
            }
        }
    }
}

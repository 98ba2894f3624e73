//! Password hashes backing the `AUTH_USERS` credential store.
//!
//! Entries are Argon2id PHC strings, so each one carries its own salt and
//! cost parameters. `registry-api hash-password` produces them with
//! [`hash_password`]; [`HashedCredentials`](crate::auth::credentials::HashedCredentials)
//! checks login attempts with [`verify_password`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

/// PHC string for an `AUTH_USERS` entry, salted from [`OsRng`].
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a login password against a user's stored entry.
///
/// A mismatch is `Ok(false)`. `Err` means the stored entry itself is unusable.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, HashError> {
    let stored = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether `hash` parses as a PHC string. Used to reject plaintext entries
/// when `AUTH_USERS` is loaded.
pub fn is_phc_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}

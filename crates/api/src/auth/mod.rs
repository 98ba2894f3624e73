//! Authentication primitives.
//!
//! - [`jwt`] -- the token authority: login, session token issuance and verification.
//! - [`credentials`] -- pluggable user/password checkers.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`cookie`] -- reading and writing the session cookie.

pub mod cookie;
pub mod credentials;
pub mod jwt;
pub mod password;

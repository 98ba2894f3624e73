//! Request gate for protected routes.
//!
//! - [`session::Session`] -- Extracts and verifies the session cookie.
//! - [`session::require_session`] -- Middleware rejecting requests without one.

pub mod session;

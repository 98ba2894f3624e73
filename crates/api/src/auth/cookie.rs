//! Session cookie parsing and formatting.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

use crate::auth::jwt::{IssuedToken, SESSION_TTL_MINS};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieError {
    /// No cookie with the requested name was sent.
    Missing,
    /// A `Cookie` header could not be read as text.
    Malformed,
}

/// Find the value of cookie `name` across all `Cookie` headers.
///
/// Pairs without `=` are skipped. Surrounding double quotes are stripped
/// from the value.
pub fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, CookieError> {
    for header in headers.get_all(COOKIE) {
        let raw = header.to_str().map_err(|_| CookieError::Malformed)?;
        for pair in raw.split(';') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() == name {
                let value = value.trim();
                return Ok(value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value));
            }
        }
    }
    Err(CookieError::Missing)
}

/// `Set-Cookie` value carrying a session token.
///
/// `Expires` mirrors the token's `exp` claim.
pub fn session_set_cookie(issued: &IssuedToken) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}; Expires={}",
        issued.token,
        SESSION_TTL_MINS * 60,
        issued.expires_at.format("%a, %d %b %Y %H:%M:%S GMT"),
    )
}

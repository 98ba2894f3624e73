//! Session cookie extractor and the middleware gating company routes.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::cookie::{find_cookie, CookieError, SESSION_COOKIE};
use crate::auth::jwt::{Claims, VerifyError};
use crate::error::AppError;
use crate::state::AppState;

/// A verified session taken from the `token` cookie.
///
/// ```ignore
/// async fn my_handler(session: Session) -> AppResult<Json<()>> {
///     tracing::info!(user = %session.claims.sub, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = find_cookie(&parts.headers, SESSION_COOKIE).map_err(|e| match e {
            CookieError::Missing => AppError::unauthorized("Missing session cookie"),
            CookieError::Malformed => AppError::BadRequest("Unreadable Cookie header".into()),
        })?;

        let claims = state.tokens.verify(token).map_err(|e| match e {
            VerifyError::InvalidSignature => AppError::unauthorized("Invalid session token"),
            VerifyError::Expired => AppError::unauthorized("Session token has expired"),
            VerifyError::Malformed(err) => {
                AppError::BadRequest(format!("Malformed session token: {err}"))
            }
        })?;

        Ok(Session { claims })
    }
}

/// Run the inner service only for requests carrying a valid session.
///
/// The request is passed on unmodified.
pub async fn require_session(session: Session, request: Request, next: Next) -> Response {
    tracing::debug!(user = %session.claims.sub, "Session accepted");
    next.run(request).await
}

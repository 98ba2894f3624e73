//! Handler for the login route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::cookie::session_set_cookie;
use crate::auth::credentials::Credential;
use crate::auth::jwt::LoginError;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Successful login response. The token itself travels in the cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub expires_at: DateTime<Utc>,
}

/// POST {AUTH_SUBROUTE}
///
/// Exchange a user/password pair for a session cookie.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credential>, JsonRejection>,
) -> AppResult<([(HeaderName, HeaderValue); 1], Json<LoginResponse>)> {
    let Json(credential) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected login body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let issued = state.tokens.login(&credential).map_err(|e| match e {
        LoginError::InvalidCredentials => {
            tracing::warn!(user = %credential.user, "Login rejected");
            AppError::unauthorized("Invalid user or password")
        }
        LoginError::Signing(err) => AppError::InternalError(format!("sign session token: {err}")),
    })?;

    let cookie = HeaderValue::from_str(&session_set_cookie(&issued))
        .map_err(|e| AppError::InternalError(format!("build session cookie: {e}")))?;

    tracing::info!(user = %credential.user, "Session issued");
    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            expires_at: issued.expires_at,
        }),
    ))
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use registry_core::memory::MemoryCompanyStore;
use registry_core::service::CompanyService;
use registry_core::store::CompanyStore;
use tower::ServiceExt;

use registry_api::auth::credentials::MirrorCredentials;
use registry_api::auth::jwt::{SigningKey, TokenAuthority};
use registry_api::config::{AuthConfig, ServerConfig};
use registry_api::router::build_app_router;
use registry_api::state::AppState;

/// Signing key shared by the test app and tests that forge tokens.
pub const TEST_KEY: &[u8] = b"registry-test-key";

/// Build a test `ServerConfig` with the default mount points.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth_subroute: "/auth".to_string(),
        company_subroute: "/company".to_string(),
        auth: AuthConfig {
            key: SigningKey::new(TEST_KEY),
            credentials: None,
        },
    }
}

/// A token authority over [`TEST_KEY`] that accepts `user == password`.
pub fn test_authority() -> TokenAuthority {
    TokenAuthority::new(&SigningKey::new(TEST_KEY), Arc::new(MirrorCredentials))
}

/// Build the full application router over an in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemoryCompanyStore::new()))
}

/// Build the full application router over `store`, using the same middleware
/// stack as production.
pub fn build_test_app_with_store(store: Arc<dyn CompanyStore>) -> Router {
    build_test_app_with(store, &test_config())
}

pub fn build_test_app_with(store: Arc<dyn CompanyStore>, config: &ServerConfig) -> Router {
    let state = AppState {
        companies: CompanyService::new(store),
        tokens: Arc::new(test_authority()),
    };
    build_app_router(state, config).expect("test router should build")
}

/// Send a request with an optional session cookie and optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Whether the response body is empty.
pub async fn body_is_empty(response: Response<Body>) -> bool {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .is_empty()
}

/// Log in as `user` (password equal to the name) and return the
/// `token=<jwt>` pair to send back in a `Cookie` header.
pub async fn login_cookie(app: Router, user: &str) -> String {
    let body = serde_json::json!({ "user": user, "password": user });
    let response = post_json(app, "/auth", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    cookie_pair(&response)
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn cookie_pair(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

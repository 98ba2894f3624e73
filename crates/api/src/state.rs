use std::sync::Arc;

use registry_core::service::CompanyService;

use crate::auth::jwt::TokenAuthority;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Company lifecycle operations.
    pub companies: CompanyService,
    /// Issues session tokens on login and verifies them on every protected request.
    pub tokens: Arc<TokenAuthority>,
}

//! Route definitions for the company resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::company;
use crate::middleware::session::require_session;
use crate::state::AppState;

/// Routes mounted at `COMPANY_SUBROUTE`. Every route requires a session.
///
/// ```text
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(company::create))
        .route(
            "/{id}",
            get(company::get_by_id)
                .patch(company::update)
                .delete(company::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_session))
}

//! Route definitions for the `/films` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Film routes mounted at `/films`.
///
/// ```text
/// GET /                -> list
/// GET /search          -> search
/// GET /{id}            -> get_by_id
/// GET /{id}/similar    -> similar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list))
        .route("/search", get(films::search))
        .route("/{id}", get(films::get_by_id))
        .route("/{id}/similar", get(films::similar))
}

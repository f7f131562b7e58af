//! Route definitions for the `/genres` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::genres;
use crate::state::AppState;

/// Genre routes mounted at `/genres`.
///
/// ```text
/// GET /           -> list
/// GET /search     -> search
/// GET /{id}       -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list))
        .route("/search", get(genres::search))
        .route("/{id}", get(genres::get_by_id))
}

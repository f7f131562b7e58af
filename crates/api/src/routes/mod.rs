pub mod films;
pub mod genres;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /films                       list (sort, genre filter, pagination)
/// /films/search                full-text search
/// /films/{id}                  detail
/// /films/{id}/similar          similar films
///
/// /genres                      list
/// /genres/search               fuzzy name search
/// /genres/{id}                 detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/films", films::router())
        .nest("/genres", genres::router())
}

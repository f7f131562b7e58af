//! Handlers for the `/films` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use movies_db::repositories::Catalog;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::find_or_404;
use crate::query::{FilmListParams, SearchParams, SimilarPageParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/films?sort=-imdb_rating&genre={id}&page_number=1&page_size=50
///
/// Films sorted by rating (or name), optionally filtered by genre id. The
/// sort defaults to [`DEFAULT_SORT`](movies_core::sort::DEFAULT_SORT). An
/// unknown genre id yields an empty list.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FilmListParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let films = state
        .titles
        .list(params.sort(), params.genre(), params.page())
        .await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/films/search?query=...
///
/// Full-text search over title and description, in relevance order.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let films = state.titles.search(&params.query, params.page()).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/films/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let film = find_or_404(&state.titles, &id).await?;
    Ok(Json(DataResponse { data: film }))
}

/// GET /api/v1/films/{id}/similar?page_number=1&page_size=10
///
/// Films sharing genres, people, or wording with the given film, highest
/// rated first. An unknown film id yields an empty list.
pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SimilarPageParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let films = state.titles.similar(&id, params.page()).await?;
    Ok(Json(DataResponse { data: films }))
}

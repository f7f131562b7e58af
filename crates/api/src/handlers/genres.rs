//! Handlers for the `/genres` resource.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use movies_db::repositories::Catalog;
use validator::Validate;

use crate::error::AppResult;
use crate::handlers::find_or_404;
use crate::query::{PageParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/genres?page_number=1&page_size=50
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let genres = state.categories.list(params.page()).await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /api/v1/genres/search?query=...
///
/// Name search tolerant of small misspellings.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    params.validate()?;
    let genres = state.categories.search(&params.query, params.page()).await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let genre = find_or_404(&state.categories, &id).await?;
    Ok(Json(DataResponse { data: genre }))
}

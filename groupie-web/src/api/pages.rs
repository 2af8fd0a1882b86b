//! HTML pages: artist list and artist detail

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
};
use groupie_common::model::ArtistId;
use tracing::debug;

use super::query::{self, QueryPairs};
use crate::catalog;
use crate::error::{ApiError, ApiResult};
use crate::render;
use crate::AppState;

/// GET /
///
/// Lists every artist in catalog order.
pub async fn home_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let dataset = state.store.ensure_loaded().await?;
    let html = render::render_home(&dataset.artists)?;
    Ok(Html(html))
}

/// GET /artist?id=N
///
/// Missing or non-numeric `id` is a 400; an unknown one is a 404. When `id`
/// is repeated the first value wins.
pub async fn artist_page(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let params = query::pairs(params)?;
    let id = parse_artist_id(query::first(&params, "id"))?;

    let dataset = state.store.ensure_loaded().await?;
    let detail = catalog::assemble(&dataset, id).ok_or(ApiError::ArtistNotFound(id))?;

    debug!(
        artist_id = id,
        concerts = detail.linked_concerts.len(),
        "Rendering artist page"
    );

    let html = render::render_artist(&detail)?;
    Ok(Html(html))
}

/// Parse the `id` query parameter
fn parse_artist_id(raw: Option<&str>) -> ApiResult<ArtistId> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing artist id".to_string()))?;

    raw.parse::<ArtistId>()
        .map_err(|_| ApiError::BadRequest(format!("invalid artist id: {}", raw)))
}

//! Search suggestions endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::query::{self, QueryPairs};
use crate::catalog;
use crate::error::JsonError;
use crate::AppState;

/// GET /search?q=text
///
/// Returns a JSON array of `{"name", "type", "id"}` suggestions. An absent
/// `q` is an empty query; a repeated one uses its first value.
pub async fn search_suggestions(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Response, JsonError> {
    let params = query::pairs(params)?;
    let text = query::first(&params, "q").unwrap_or_default();

    let dataset = state.store.ensure_loaded().await?;
    let items = catalog::search(&dataset, text);

    debug!(query = %text, results = items.len(), "Search");

    let body = serde_json::to_vec(&items)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

//! groupie-web library
//!
//! Web front end for the public band catalog: artist list, artist detail
//! pages, JSON search suggestions and static assets.

use axum::{routing::MethodRouter, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod error;
pub mod render;

pub use crate::error::{ApiError, ApiResult};
use crate::catalog::CatalogStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog, loaded on first use
    pub store: Arc<CatalogStore>,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<CatalogStore>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            assets_dir: assets_dir.into(),
        }
    }
}

/// Build application router
///
/// Page routes answer 405 for methods other than GET (HEAD included); unknown
/// paths get 404.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let assets = ServeDir::new(&state.assets_dir);

    Router::new()
        .route("/", get_only(get(api::home_page)))
        .route("/artist", get_only(get(api::artist_page)))
        .route("/search", get_only(get(api::search_suggestions)))
        .merge(api::health_routes())
        .nest_service("/assets", assets)
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Restrict a GET route: `get` would also answer HEAD, so HEAD is routed to
/// the 405 handler along with every other method
fn get_only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route
        .head(api::method_not_allowed)
        .fallback(api::method_not_allowed)
}

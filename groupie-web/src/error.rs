//! Error types for groupie-web
//!
//! Client errors (4xx) are answered and forgotten. Server errors (5xx) are
//! logged and answered for that request only; the service keeps running.
//! The one exception is a failed catalog load, which the store turns into a
//! shutdown on its own.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use groupie_common::model::ArtistId;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::catalog::CatalogUnavailable;
use crate::render;

/// Page and API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request parameter (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No artist with the requested id (404)
    #[error("Artist not found: {0}")]
    ArtistNotFound(ArtistId),

    /// No route for the path (404)
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Route exists, method does not (405)
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Page could not be rendered (500)
    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Response body could not be serialized (500)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catalog failed to load (500)
    #[error(transparent)]
    CatalogUnavailable(#[from] CatalogUnavailable),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ArtistNotFound(_) | ApiError::PageNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Render(_) | ApiError::Serialization(_) | ApiError::CatalogUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ArtistNotFound(_) => "ARTIST_NOT_FOUND",
            ApiError::PageNotFound(_) => "NOT_FOUND",
            ApiError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            ApiError::Render(_) => "RENDER_ERROR",
            ApiError::Serialization(_) => "SERIALIZATION_ERROR",
            ApiError::CatalogUnavailable(_) => "CATALOG_UNAVAILABLE",
        }
    }

    /// Headline shown on the error page
    pub fn headline(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD REQUEST",
            ApiError::ArtistNotFound(_) => "ARTIST NOT FOUND",
            ApiError::PageNotFound(_) => "PAGE NOT FOUND",
            ApiError::MethodNotAllowed(_) => "METHOD NOT ALLOWED",
            ApiError::Render(_) | ApiError::Serialization(_) | ApiError::CatalogUnavailable(_) => {
                "INTERNAL SERVER ERROR"
            }
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            error!(code = self.code(), "{}", self);
        } else {
            warn!(code = self.code(), "{}", self);
        }
    }
}

/// Errors from page routes render as an HTML error page
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        let page = render::render_error(status.as_u16(), self.headline());
        (status, Html(page)).into_response()
    }
}

/// JSON flavour of [`ApiError`] for the JSON endpoints
///
/// Body: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl From<ApiError> for JsonError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<CatalogUnavailable> for JsonError {
    fn from(err: CatalogUnavailable) -> Self {
        Self(ApiError::from(err))
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        Self(ApiError::from(err))
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let err = self.0;
        err.log();

        let body = Json(json!({
            "error": {
                "code": err.code(),
                "message": err.to_string(),
            }
        }));

        (err.status(), body).into_response()
    }
}

/// Result type for page handlers
pub type ApiResult<T> = Result<T, ApiError>;

//! Unmatched paths and methods

use axum::http::{Method, Uri};

use crate::error::ApiError;

/// Any path without a route
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::PageNotFound(uri.path().to_string())
}

/// A known path requested with a method other than GET
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}

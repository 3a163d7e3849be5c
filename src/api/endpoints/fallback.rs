//! JSON answer for anything under `/api/` that no handler takes.

use axum::extract::OriginalUri;
use axum::http::Method;

use crate::api::error::ApiError;

/// Unknown path, or a known path with a method it does not serve.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    tracing::debug!(%method, path = uri.path(), "No API route");
    ApiError::NotFound(format!("No route for {method} {}", uri.path()))
}

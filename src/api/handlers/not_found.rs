//! Fallback for requests no short URL answered.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Responds with a JSON 404.
///
/// Wrapped by the redirect middleware on `/{code}` and used as the router
/// fallback for every other path.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Not found", json!({ "path": uri.path() }))
}

//! Fallback handler for requests no route and no redirect rule claimed.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Terminal stage of the pipeline: responds `404 Not Found`.
pub async fn fallback_handler(uri: Uri) -> AppError {
    AppError::not_found("Not found", json!({"path": uri.path()}))
}

//! Bearer token authentication middleware for the admin API.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Checks the `Authorization: Bearer <token>` header against `ADMIN_TOKEN`.
///
/// Every failure is a `401 Unauthorized` with `WWW-Authenticate: Bearer`,
/// including the case where no admin token is configured.
///
/// ```rust,ignore
/// let protected = api::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_service = st
        .auth_service
        .as_deref()
        .ok_or_else(|| rejected("Admin API is disabled"))?;

    let (mut parts, body) = req.into_parts();
    let token = bearer_token(&mut parts).await?;

    auth_service.authenticate(&token)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn bearer_token(parts: &mut Parts) -> Result<String, AppError> {
    AuthBearer::from_request_parts(parts, &())
        .await
        .map(|AuthBearer(token)| token)
        .map_err(|_| rejected("Authorization header is missing or invalid"))
}

fn rejected(reason: &str) -> AppError {
    AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
}

//! Admin API route configuration.
//!
//! All admin endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{list_rules_handler, match_rule_handler, refresh_rules_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Admin routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET  /rules`          - Current rule table and cache metadata
/// - `POST /rules/refresh`  - Fetch rules now and wait for the result
/// - `GET  /rules/match`    - Probe the matcher with `?path=`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", get(list_rules_handler))
        .route("/rules/refresh", post(refresh_rules_handler))
        .route("/rules/match", get(match_rule_handler))
}

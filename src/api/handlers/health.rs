//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{HealthChecks, HealthResponse, RulesCheck};
use crate::state::AppState;

/// Returns service health status with rule cache details.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: A rule table is loaded (possibly stale)
/// - **503 Service Unavailable**: No rule table has been loaded yet
///
/// A stale table still reports healthy: redirects keep working from the last
/// known-good rules while a refresh is pending.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "rules": {
///       "status": "ok",
///       "source": "file:data/redirects.json",
///       "rule_count": 12,
///       "stale": false,
///       "refreshing": false,
///       "last_fetched_at": "2026-10-16T09:00:00Z"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let rules_check = check_rules(&state);
    let healthy = rules_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { rules: rules_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Reports whether a rule table is loaded and how fresh it is.
fn check_rules(state: &AppState) -> RulesCheck {
    let cache = &state.rule_cache;
    let snapshot = cache.state();
    let stale = snapshot.is_stale(Utc::now(), cache.config().freshness_window);

    let (status, rule_count, message) = match &snapshot.table {
        Some(table) => ("ok", table.len(), None),
        None => ("error", 0, Some("No rule table loaded".to_string())),
    };

    RulesCheck {
        status: status.to_string(),
        source: cache.source_description(),
        rule_count,
        stale,
        refreshing: cache.is_refreshing(),
        last_fetched_at: snapshot.last_fetched_at,
        message,
    }
}

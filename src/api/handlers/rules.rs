//! Handlers for inspecting and refreshing the rule table.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use tracing::info;

use crate::api::dto::rules::{MatchQuery, MatchResponse, RefreshResponse, RulesResponse};
use crate::domain::matcher::find_redirect;
use crate::error::AppError;
use crate::infrastructure::sources::RuleRecord;
use crate::state::AppState;

/// Lists the rules currently served by the interceptor.
///
/// # Endpoint
///
/// `GET /api/rules`
///
/// Never triggers a fetch; an empty cache is reported with `loaded: false`.
pub async fn list_rules_handler(State(state): State<AppState>) -> Json<RulesResponse> {
    let cache = &state.rule_cache;
    let snapshot = cache.state();

    let rules: Vec<RuleRecord> = snapshot
        .table
        .as_ref()
        .map(|table| table.iter().map(RuleRecord::from).collect())
        .unwrap_or_default();

    Json(RulesResponse {
        loaded: snapshot.table.is_some(),
        stale: snapshot.is_stale(Utc::now(), cache.config().freshness_window),
        refreshing: cache.is_refreshing(),
        last_fetched_at: snapshot.last_fetched_at,
        rules,
    })
}

/// Fetches the rule table now and waits for the result.
///
/// # Endpoint
///
/// `POST /api/rules/refresh`
///
/// # Errors
///
/// Returns `502 Bad Gateway` if the source fails. The previously loaded
/// table stays in service.
pub async fn refresh_rules_handler(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    info!("Manual rule refresh requested");

    let rule_count = state.rule_cache.refresh().await?;

    Ok(Json(RefreshResponse {
        rule_count,
        fetched_at: state.rule_cache.state().last_fetched_at,
    }))
}

/// Runs the matcher against the current table without redirecting.
///
/// # Endpoint
///
/// `GET /api/rules/match?path=/old/page`
pub async fn match_rule_handler(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Json<MatchResponse> {
    let decision = state
        .rule_cache
        .snapshot()
        .and_then(|table| find_redirect(&query.path, &table));

    Json(MatchResponse::new(query.path, decision))
}

mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{ScriptedSource, sample_rules};
use path_redirector::api::handlers::health_handler;
use path_redirector::domain::repositories::SourceError;
use std::sync::Arc;

fn health_app(state: path_redirector::AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::loaded_state().await;
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["rules"]["status"], "ok");
    assert_eq!(json["checks"]["rules"]["rule_count"], 4);
    assert_eq!(json["checks"]["rules"]["stale"], false);
    assert_eq!(json["checks"]["rules"]["source"], "static:4 rules");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let state = common::loaded_state().await;
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("rules").is_some());
    assert!(json["checks"]["rules"].get("last_fetched_at").is_some());
    assert!(json["checks"]["rules"].get("message").is_none());
}

#[tokio::test]
async fn test_health_degraded_before_first_load() {
    let state = common::create_test_state(Arc::new(ScriptedSource::new(vec![])));
    let server = TestServer::new(health_app(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["rules"]["status"], "error");
    assert_eq!(json["checks"]["rules"]["rule_count"], 0);
    assert_eq!(json["checks"]["rules"]["stale"], true);
    assert!(json["checks"]["rules"].get("last_fetched_at").is_none());
}

#[tokio::test]
async fn test_health_stays_ok_when_source_fails_after_load() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(sample_rules()),
        Err(SourceError::Status(500)),
    ]));
    let state = common::create_test_state(source);
    state.rule_cache.refresh().await.unwrap();
    let _ = state.rule_cache.refresh().await;

    let server = TestServer::new(health_app(state)).unwrap();
    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["rules"]["status"], "ok");
    assert_eq!(json["checks"]["rules"]["rule_count"], 4);
}

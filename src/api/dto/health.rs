//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response with component status.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub rules: RulesCheck,
}

/// Rule cache health status.
#[derive(Debug, Serialize, Deserialize)]
pub struct RulesCheck {
    pub status: String,
    pub source: String,
    pub rule_count: usize,
    pub stale: bool,
    pub refreshing: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fetched_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

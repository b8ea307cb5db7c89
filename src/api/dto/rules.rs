//! DTOs for the rule inspection and refresh endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::matcher::RedirectDecision;
use crate::infrastructure::sources::RuleRecord;

/// Current rule table with cache metadata.
///
/// Rules are rendered in the same wire format the sources consume, so the
/// output of `GET /api/rules` can be saved and used as a rule file.
#[derive(Debug, Serialize, Deserialize)]
pub struct RulesResponse {
    pub loaded: bool,
    pub stale: bool,
    pub refreshing: bool,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub rules: Vec<RuleRecord>,
}

/// Result of a manual refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub rule_count: usize,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Query parameters for `GET /api/rules/match`.
#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub path: String,
}

/// Matcher outcome for a path submitted to `GET /api/rules/match`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub path: String,
    pub matched: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_index: Option<usize>,
}

impl MatchResponse {
    pub fn new(path: String, decision: Option<RedirectDecision>) -> Self {
        match decision {
            Some(decision) => Self {
                path,
                matched: true,
                status: Some(decision.status_code()),
                rule_index: Some(decision.rule_index),
                target_url: Some(decision.target_url),
            },
            None => Self {
                path,
                matched: false,
                target_url: None,
                status: None,
                rule_index: None,
            },
        }
    }
}

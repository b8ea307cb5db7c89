//! Rule source trait for fetching the redirect rule table.

use crate::domain::entities::RuleTable;
use async_trait::async_trait;
use std::time::Duration;

/// Errors raised while fetching rules from a source.
///
/// None of these ever reach the request path: the cache logs them at the
/// refresh boundary and keeps serving the previous table.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read rule source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed rule data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Rule source returned an empty payload")]
    EmptyPayload,

    #[error("Rule source request failed: {0}")]
    Http(String),

    #[error("Rule source responded with status {0}")]
    Status(u16),

    #[error("Rule source did not respond within {0:?}")]
    Timeout(Duration),
}

/// Provider of the current redirect rule list.
///
/// The cache treats a source as opaque: file-backed, HTTP-backed or in-memory
/// sources are all valid. Implementations must be thread-safe since refreshes
/// run on background tasks.
///
/// # Implementations
///
/// - [`crate::infrastructure::sources::FileRuleSource`] - JSON file on disk
/// - [`crate::infrastructure::sources::HttpRuleSource`] - JSON document over HTTP
/// - [`crate::infrastructure::sources::StaticRuleSource`] - Fixed in-memory table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Fetches the current, ordered rule list.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the source is unreachable, times out,
    /// or returns data that cannot be parsed into rules.
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError>;

    /// Short human-readable description used in logs and health output.
    fn describe(&self) -> String;
}

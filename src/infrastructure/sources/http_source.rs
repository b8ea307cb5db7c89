//! HTTP-backed rule source.

use super::record::parse_rules;
use crate::domain::entities::RuleTable;
use crate::domain::repositories::{RuleSource, SourceError};
use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};
use url::Url;

/// Fetches the rule table as a JSON document from a remote endpoint.
///
/// Transport errors and `5xx` responses are retried with jittered exponential
/// backoff; `4xx` responses and malformed documents fail immediately.
pub struct HttpRuleSource {
    client: Client,
    url: Url,
    retries: usize,
}

impl HttpRuleSource {
    /// Creates a source for `url`.
    ///
    /// # Arguments
    ///
    /// - `url` - Endpoint returning the rule document
    /// - `request_timeout` - Per-attempt timeout applied by the HTTP client
    /// - `retries` - Extra attempts after the first failure
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(url: Url, request_timeout: Duration, retries: usize) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SourceError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            retries,
        })
    }

    async fn fetch_once(&self) -> Result<RuleTable, SourceError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Rule source returned error status");
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;
        debug!(url = %self.url, bytes = body.len(), "Fetched rule document");

        parse_rules(&body)
    }
}

/// Returns true for failures worth another attempt.
fn is_transient(error: &SourceError) -> bool {
    match error {
        SourceError::Http(_) => true,
        SourceError::Status(status) => *status >= 500,
        _ => false,
    }
}

#[async_trait]
impl RuleSource for HttpRuleSource {
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError> {
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.retries);

        RetryIf::spawn(strategy, || self.fetch_once(), is_transient).await
    }

    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }
}

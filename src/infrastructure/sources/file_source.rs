//! File-backed rule source.

use super::record::parse_rules;
use crate::domain::entities::RuleTable;
use crate::domain::repositories::{RuleSource, SourceError};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Reads the rule table from a JSON document on disk.
///
/// The file is re-read on every fetch, so edits are picked up on the next
/// cache refresh without restarting the service.
pub struct FileRuleSource {
    path: PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RuleSource for FileRuleSource {
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read rule file");

        parse_rules(&bytes)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

//! In-memory rule source.

use crate::domain::entities::RuleTable;
use crate::domain::repositories::{RuleSource, SourceError};
use async_trait::async_trait;

/// A rule source that always returns the same table.
///
/// # Use Cases
///
/// - Embedding the interceptor with rules known at build time
/// - Tests that need a deterministic source
pub struct StaticRuleSource {
    table: RuleTable,
}

impl StaticRuleSource {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl RuleSource for StaticRuleSource {
    async fn fetch_rules(&self) -> Result<RuleTable, SourceError> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} rules", self.table.len())
    }
}

//! JSON wire format shared by every rule source.

use crate::domain::entities::{RedirectKind, RedirectRule, RuleTable};
use crate::domain::repositories::SourceError;
use serde::{Deserialize, Serialize};

/// One rule as stored in a rule document.
///
/// ```json
/// { "redirectUrl": "/old", "targetUrl": "/new", "redirectType": 301, "useRelative": true }
/// ```
///
/// Every field is optional on input. PascalCase field names are accepted as
/// well, since rule documents are often produced by other stacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    #[serde(default, alias = "RedirectUrl")]
    pub redirect_url: Option<String>,
    #[serde(default, alias = "TargetUrl")]
    pub target_url: Option<String>,
    #[serde(default, alias = "RedirectType")]
    pub redirect_type: Option<i64>,
    #[serde(default, alias = "UseRelative")]
    pub use_relative: bool,
}

impl From<RuleRecord> for RedirectRule {
    fn from(record: RuleRecord) -> Self {
        RedirectRule::new(
            record.redirect_url.unwrap_or_default(),
            record.target_url.unwrap_or_default(),
            RedirectKind::from_status(record.redirect_type.unwrap_or_default()),
            record.use_relative,
        )
    }
}

impl From<&RedirectRule> for RuleRecord {
    fn from(rule: &RedirectRule) -> Self {
        Self {
            redirect_url: Some(rule.match_path.clone()),
            target_url: Some(rule.target_path.clone()),
            redirect_type: Some(i64::from(rule.kind.status_code())),
            use_relative: rule.use_relative,
        }
    }
}

/// Parses a rule document into a [`RuleTable`].
///
/// # Errors
///
/// - [`SourceError::Malformed`] if the document is not a JSON array of rules
/// - [`SourceError::EmptyPayload`] if the document is JSON `null`
pub fn parse_rules(bytes: &[u8]) -> Result<RuleTable, SourceError> {
    let records: Option<Vec<RuleRecord>> = serde_json::from_slice(bytes)?;
    let records = records.ok_or(SourceError::EmptyPayload)?;

    Ok(records.into_iter().map(RedirectRule::from).collect())
}

//! Path matching against a redirect rule table.
//!
//! Matching is a pure function of the request path and a table snapshot. It
//! performs no I/O and never mutates the table, so any number of request
//! tasks can run it concurrently against the same `Arc<RuleTable>`.
//!
//! # Algorithm
//!
//! 1. Collapse doubled separators in the request path (`//a//b` → `/a/b`)
//! 2. Walk the table in insertion order
//! 3. Exact rules match when the path equals `match_path` (ignoring case)
//! 4. Relative rules match when `match_path` is a prefix of the path
//!    (ignoring case); the prefix is replaced by `target_path`
//! 5. The first rule with a non-empty resolved target wins
//!
//! Rules that match structurally but resolve to an empty target are logged
//! and skipped; scanning continues with the next rule.

use crate::domain::entities::{RedirectRule, RuleTable};
use crate::utils::path_normalizer::{collapse_separators, eq_ignore_case, strip_prefix_ignore_case};
use tracing::error;

/// Outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    /// Value for the `Location` header.
    pub target_url: String,
    /// `true` for 301, `false` for 302.
    pub permanent: bool,
    /// Position of the matching rule in the table.
    pub rule_index: usize,
}

impl RedirectDecision {
    pub fn status_code(&self) -> u16 {
        if self.permanent { 301 } else { 302 }
    }
}

/// Finds the redirect for `path`, if any rule in `table` applies.
///
/// Returns `None` when no rule matches, when the path is empty, or when every
/// matching rule resolves to an empty target.
///
/// # Examples
///
/// ```ignore
/// let table = RuleTable::new(vec![
///     RedirectRule::relative("/old", "/new", RedirectKind::Permanent),
/// ]);
///
/// let decision = find_redirect("/old/sub/page", &table).unwrap();
/// assert_eq!(decision.target_url, "/new/sub/page");
/// assert!(decision.permanent);
/// ```
pub fn find_redirect(path: &str, table: &RuleTable) -> Option<RedirectDecision> {
    let path = collapse_separators(path);
    if path.is_empty() {
        return None;
    }

    table.iter().enumerate().find_map(|(rule_index, rule)| {
        let target_url = resolve_target(&path, rule)?;
        if target_url.is_empty() {
            error!(
                rule_index,
                match_path = %rule.match_path,
                path = %path,
                "Redirect rule matched but its target is empty, skipping"
            );
            return None;
        }

        Some(RedirectDecision {
            target_url,
            permanent: rule.kind.is_permanent(),
            rule_index,
        })
    })
}

/// Applies a single rule to an already normalized path.
///
/// Returns the resolved target when the rule's predicate holds. The target
/// may be empty; callers decide what to do with it.
pub fn resolve_target(path: &str, rule: &RedirectRule) -> Option<String> {
    if !rule.is_eligible() {
        return None;
    }

    if rule.use_relative {
        let remainder = strip_prefix_ignore_case(path, &rule.match_path)?;
        Some(format!("{}{}", rule.target_path, remainder))
    } else if eq_ignore_case(path, &rule.match_path) {
        Some(rule.target_path.clone())
    } else {
        None
    }
}

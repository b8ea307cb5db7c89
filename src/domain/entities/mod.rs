//! Core domain entities representing the redirect data model.
//!
//! Entities are plain data structures; matching lives in
//! [`crate::domain::matcher`] and caching in
//! [`crate::application::services::RuleCache`].
//!
//! # Entity Types
//!
//! - [`RedirectRule`] - A single path redirect rule
//! - [`RedirectKind`] - Permanent (301) or temporary (302) redirect
//! - [`RuleTable`] - Ordered, immutable list of rules

pub mod redirect_rule;

pub use redirect_rule::{RedirectKind, RedirectRule, RuleTable};

//! Data access trait definitions for the domain layer.
//!
//! The only external collaborator of the redirect core is the rule source.
//! Its trait lives here; concrete implementations live in
//! `crate::infrastructure::sources`, and a mock is generated via `mockall`
//! for unit tests.

pub mod rule_source;

pub use rule_source::{RuleSource, SourceError};

#[cfg(test)]
pub use rule_source::MockRuleSource;

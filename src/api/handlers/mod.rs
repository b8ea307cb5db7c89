//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod rules;

pub use fallback::fallback_handler;
pub use health::health_handler;
pub use rules::{list_rules_handler, match_rule_handler, refresh_rules_handler};

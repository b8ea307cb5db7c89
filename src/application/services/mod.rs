//! Services for the application layer.

pub mod auth_service;
pub mod rule_cache;

pub use auth_service::AuthService;
pub use rule_cache::{CacheSnapshot, RuleCache, RuleCacheConfig};

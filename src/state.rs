use std::sync::Arc;

use crate::application::services::{AuthService, RuleCache};

/// Shared application state injected into middleware and handlers.
#[derive(Clone)]
pub struct AppState {
    pub rule_cache: RuleCache,
    /// `None` when no admin token is configured; the admin API is then not mounted.
    pub auth_service: Option<Arc<AuthService>>,
}

impl AppState {
    pub fn new(rule_cache: RuleCache, auth_service: Option<Arc<AuthService>>) -> Self {
        Self {
            rule_cache,
            auth_service,
        }
    }
}

//! # Path Redirector
//!
//! An HTTP request interceptor that redirects incoming paths according to an
//! externally sourced rule table, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Redirect rules, the rule source trait, and path matching
//! - **Application Layer** ([`application`]) - The stale-while-revalidate rule cache
//! - **Infrastructure Layer** ([`infrastructure`]) - File, HTTP and in-memory rule sources
//! - **API Layer** ([`api`]) - Redirect middleware, admin handlers, DTOs
//!
//! ## How It Works
//!
//! Every request passes through the redirect middleware. It reads the current
//! rule table snapshot (never blocking, never doing I/O), evaluates the path
//! against it, and either answers `301`/`302` or hands the request on. When
//! the table is older than the freshness window a refresh is started in the
//! background; the request never waits for it. If the rule source fails, the
//! last known-good table stays in service.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIRECT_RULES_FILE="data/redirects.json"
//! export REDIRECT_CACHE_LIFESPAN_MINUTES=5
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, CacheSnapshot, RuleCache, RuleCacheConfig};
    pub use crate::domain::entities::{RedirectKind, RedirectRule, RuleTable};
    pub use crate::domain::matcher::{RedirectDecision, find_redirect};
    pub use crate::domain::repositories::{RuleSource, SourceError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::sources::{FileRuleSource, HttpRuleSource, StaticRuleSource};
    pub use crate::state::AppState;
}

//! Application layer services.
//!
//! This layer coordinates the domain with its external collaborators. Services
//! consume domain traits and provide a clean API for middleware and handlers.
//!
//! # Available Services
//!
//! - [`services::rule_cache::RuleCache`] - Stale-while-revalidate rule table cache
//! - [`services::auth_service::AuthService`] - Admin API token authentication

pub mod services;

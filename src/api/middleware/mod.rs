//! HTTP middleware for request processing.
//!
//! Provides the redirect interceptor, admin authentication, and observability
//! middleware.

pub mod auth;
pub mod redirect;
pub mod tracing;

//! HTTP layer: the redirect interceptor and the admin API.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Redirect interceptor, authentication and tracing
//! - [`routes`] - Admin route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

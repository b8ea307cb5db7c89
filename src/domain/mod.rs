//! Domain layer containing the redirect data model and matching logic.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.
//!
//! # Architecture
//!
//! - [`entities`] - Redirect rules and the rule table
//! - [`repositories`] - The rule source trait implemented by infrastructure
//! - [`matcher`] - Pure path matching against a rule table
//!
//! # Request Flow
//!
//! 1. The redirect middleware takes a table snapshot from the rule cache
//! 2. [`matcher::find_redirect`] evaluates the request path against it
//! 3. A [`matcher::RedirectDecision`] becomes a 301/302 response; no decision
//!    passes the request on unchanged

pub mod entities;
pub mod matcher;
pub mod repositories;

//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete rule sources.
//!
//! # Modules
//!
//! - [`sources`] - File, HTTP and in-memory rule sources

pub mod sources;

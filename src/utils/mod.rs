//! Utility functions used across the application.
//!
//! - [`path_normalizer`] - Request path decoding, normalization and case-insensitive comparison

pub mod path_normalizer;

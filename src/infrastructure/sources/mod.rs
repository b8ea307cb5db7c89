//! Rule source implementations.
//!
//! Provides three implementations of [`crate::domain::repositories::RuleSource`]:
//! - [`FileRuleSource`] - JSON document on local disk
//! - [`HttpRuleSource`] - JSON document fetched over HTTP with retries
//! - [`StaticRuleSource`] - Fixed in-memory table
//!
//! All of them share the wire format defined in [`record`].

mod file_source;
mod http_source;
pub mod record;
mod static_source;

pub use file_source::FileRuleSource;
pub use http_source::HttpRuleSource;
pub use record::{RuleRecord, parse_rules};
pub use static_source::StaticRuleSource;

//! Domain models for prefix range expansion.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Prefix`] - canonical IPv4/IPv6 network in CIDR notation
//! - [`RangeRule`] - a prefix with inclusive length bounds
//! - [`RuleRecord`] - one record of the JSON rule file

mod prefix;
mod record;
mod rule;

// Re-export public types
pub use prefix::{Family, Prefix, MAX_LENGTH_V4, MAX_LENGTH_V6};
pub(crate) use prefix::low_bits;
pub use record::RuleRecord;
pub use rule::RangeRule;

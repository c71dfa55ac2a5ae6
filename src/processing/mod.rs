//! Rule processing logic.
//!
//! This module contains the core logic applied to resolved rules:
//! - [`dedup`] - De-duplication of rules into a [`RuleSet`]
//! - [`expand`] - Expansion of a prefix range into concrete subnets

mod dedup;
mod expand;

// Re-export public functions
pub use dedup::{de_duplicate_rules, RuleSet};
pub use expand::{expand, expand_rule, subnet_count, subnets, Expand, Subnets};

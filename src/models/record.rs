//! JSON rule record data model.

use super::{Prefix, RangeRule};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// One entry of the JSON rule file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleRecord {
    /// Covering prefix in CIDR notation.
    pub prefix: Prefix,
    /// Match the prefix itself only, ignoring any bounds.
    pub exact: bool,
    /// Lower length bound (defaults to the prefix length).
    #[serde(rename = "greater-equal", default, skip_serializing_if = "Option::is_none")]
    pub greater_equal: Option<u8>,
    /// Upper length bound, required unless `exact`.
    #[serde(rename = "less-equal", default, skip_serializing_if = "Option::is_none")]
    pub less_equal: Option<u8>,
}

impl RuleRecord {
    /// Resolve the record's bounds into a validated [`RangeRule`].
    pub fn resolve(&self) -> Result<RangeRule, Box<dyn Error>> {
        if self.exact {
            return Ok(RangeRule::exact(self.prefix));
        }
        let lower = self.greater_equal.unwrap_or(self.prefix.length());
        let upper = self
            .less_equal
            .ok_or_else(|| format!("Missing \"less-equal\" for non-exact prefix {}", self.prefix))?;
        RangeRule::new(self.prefix, lower, upper)
    }
}

//! Prefix range rule: a covering prefix plus inclusive length bounds.

use super::Prefix;
use std::error::Error;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A `(prefix, lower, upper)` triple covering every subnet of `prefix`
/// whose length lies in `lower..=upper`.
///
/// Construction enforces `prefix.length <= lower <= upper <= max_length`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct RangeRule {
    prefix: Prefix,
    lower: u8,
    upper: u8,
}

impl RangeRule {
    pub fn new(prefix: Prefix, lower: u8, upper: u8) -> Result<RangeRule, Box<dyn Error>> {
        if prefix.length() > lower || lower > upper || upper > prefix.max_length() {
            return Err(format!(
                "Invalid length range {lower}..={upper} for {prefix} (allowed {}..={})",
                prefix.length(),
                prefix.max_length()
            )
            .into());
        }
        Ok(RangeRule {
            prefix,
            lower,
            upper,
        })
    }

    /// Rule matching only the prefix itself.
    pub fn exact(prefix: Prefix) -> RangeRule {
        RangeRule {
            prefix,
            lower: prefix.length(),
            upper: prefix.length(),
        }
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn lower(&self) -> u8 {
        self.lower
    }

    pub fn upper(&self) -> u8 {
        self.upper
    }

    pub fn range(&self) -> RangeInclusive<u8> {
        self.lower..=self.upper
    }

    pub fn is_exact(&self) -> bool {
        self.lower == self.prefix.length() && self.upper == self.prefix.length()
    }
}

impl From<Prefix> for RangeRule {
    fn from(prefix: Prefix) -> Self {
        RangeRule::exact(prefix)
    }
}

impl fmt::Display for RangeRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.prefix, self.lower, self.upper)
    }
}

impl FromStr for RangeRule {
    type Err = Box<dyn Error>;

    /// Parse the `<prefix>,<lower>,<upper>` form written by [`fmt::Display`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("Invalid range \"{s}\", expected <prefix>,<lower>,<upper>").into());
        }
        let prefix = Prefix::parse(parts[0])?;
        let lower: u8 = parts[1]
            .parse()
            .map_err(|_| format!("Invalid lower bound {} in \"{s}\"", parts[1]))?;
        let upper: u8 = parts[2]
            .parse()
            .map_err(|_| format!("Invalid upper bound {} in \"{s}\"", parts[2]))?;
        RangeRule::new(prefix, lower, upper)
    }
}

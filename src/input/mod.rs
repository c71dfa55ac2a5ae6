//! Rule file input.
//!
//! This module handles reading rules from disk:
//! - [`json`] - JSON rule records
//! - [`ranges`] - plain `<prefix>,<lower>,<upper>` range lines

mod json;
mod ranges;

use crate::models::RangeRule;
use std::error::Error;

// Re-export public functions
pub use json::{read_rule_file, resolve_records};
pub use ranges::{parse_range_lines, read_range_file};

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// JSON array of rule records.
    #[default]
    Json,
    /// One `<prefix>,<lower>,<upper>` rule per line.
    Ranges,
}

/// Read and resolve every rule in `path`, duplicates included.
pub fn read_rules(path: &str, format: InputFormat) -> Result<Vec<RangeRule>, Box<dyn Error>> {
    match format {
        InputFormat::Json => resolve_records(&read_rule_file(path)?),
        InputFormat::Ranges => read_range_file(path),
    }
}

//! JSON rule file reading.

use crate::models::{RangeRule, RuleRecord};
use colored::Colorize;
use std::error::Error;
use std::path::Path;

/// Read the JSON array of [`RuleRecord`]s from `path`.
///
/// # Returns
/// * `Ok(Vec<RuleRecord>)` - records in file order
/// * `Err` - if the file is missing or unreadable, or the JSON is malformed.
///   Decode errors name the failing field, e.g. `[1].exact`.
pub fn read_rule_file(path: &str) -> Result<Vec<RuleRecord>, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Rule file does not exist: {path}").into());
    }
    log::info!("Reading rule file: {}", path.on_blue());

    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading rule file {path}: {e}"))?;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let records: Vec<RuleRecord> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing rule file {path} at {}: {}", e.path(), e.inner()))?;
    deserializer
        .end()
        .map_err(|e| format!("Error parsing rule file {path}: {e}"))?;

    log::info!("# Got record count = {}", records.len());
    Ok(records)
}

/// Resolve records into rules, failing on the first invalid record.
pub fn resolve_records(records: &[RuleRecord]) -> Result<Vec<RangeRule>, Box<dyn Error>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| -> Result<RangeRule, Box<dyn Error>> {
            let rule = record
                .resolve()
                .map_err(|e| format!("Invalid record [{i}]: {e}"))?;
            log::trace!("record [{i}] => {rule}");
            Ok(rule)
        })
        .collect()
}

//! Range line file reading.

use crate::models::RangeRule;
use std::error::Error;
use std::path::Path;

/// Parse `<prefix>,<lower>,<upper>` lines. Blank lines and `#` comments are skipped.
pub fn parse_range_lines(text: &str) -> Result<Vec<RangeRule>, Box<dyn Error>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| {
            line.parse::<RangeRule>()
                .map_err(|e| -> Box<dyn Error> { format!("line {n}: {e}").into() })
        })
        .collect()
}

/// Read a file of range lines, as written by range mode output.
pub fn read_range_file(path: &str) -> Result<Vec<RangeRule>, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Range file does not exist: {path}").into());
    }
    log::info!("Reading range file: {path}");
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading range file {path}: {e}"))?;
    let rules = parse_range_lines(&text).map_err(|e| format!("Error parsing {path} {e}"))?;
    log::info!("# Got range count = {}", rules.len());
    Ok(rules)
}

//! Line-oriented text output.

use crate::processing::{expand_rule, RuleSet};
use colored::Colorize;
use std::error::Error;
use std::io::Write;

/// What to write for each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One `<subnet>` line per expanded subnet.
    #[default]
    Subnets,
    /// One `<prefix>,<lower>,<upper>` line per rule.
    Ranges,
}

/// Write each rule as `<prefix>,<lower>,<upper>`.
///
/// # Returns
/// The number of lines written.
pub fn write_ranges<W: Write>(out: &mut W, rules: &RuleSet) -> Result<usize, Box<dyn Error>> {
    log::info!("#Start write_ranges() rule count = {}", rules.len());
    let mut lines = 0;
    for rule in rules {
        writeln!(out, "{rule}")?;
        lines += 1;
    }
    Ok(lines)
}

/// Expand every rule and write each subnet on its own line.
///
/// # Arguments
/// * `out` - The sink to write to
/// * `rules` - The de-duplicated rules to expand
/// * `max_subnets` - Refuse to write anything if the expansion is larger
///
/// # Returns
/// The number of lines written.
pub fn write_subnets<W: Write>(
    out: &mut W,
    rules: &RuleSet,
    max_subnets: Option<u128>,
) -> Result<usize, Box<dyn Error>> {
    let total = rules.subnet_count();
    log::info!(
        "#Start write_subnets() rule count = {}, subnet count = {}",
        rules.len(),
        total.map_or("overflow".to_string(), |n| n.to_string())
    );

    if let Some(limit) = max_subnets {
        match total {
            Some(n) if n <= limit => {}
            _ => {
                log::error!(
                    "{} expansion exceeds --max-subnets {limit}",
                    "refusing".on_red()
                );
                return Err(format!(
                    "Expansion of {} subnets exceeds limit of {limit}",
                    total.map_or("more than 2^128".to_string(), |n| n.to_string())
                )
                .into());
            }
        }
    }

    let mut lines = 0;
    for rule in rules {
        log::debug!("Expanding {}", rule.to_string().on_blue());
        for subnet in expand_rule(rule) {
            writeln!(out, "{subnet}")?;
            lines += 1;
        }
    }
    Ok(lines)
}

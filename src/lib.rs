//! Expand IP prefix range rules into test fixtures.
//!
//! Rules are read from a JSON file (or range lines), de-duplicated into a
//! [`processing::RuleSet`], then written either as `<prefix>,<lower>,<upper>`
//! lines or as every subnet each rule covers.

pub mod config;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

use config::Config;
use models::Family;
use output::OutputMode;
use processing::RuleSet;
use std::error::Error;
use std::io::Write;

/// Read, resolve and de-duplicate the rules in `path`.
pub fn get_rule_set(
    path: &str,
    format: input::InputFormat,
    family: Option<Family>,
) -> Result<RuleSet, Box<dyn Error>> {
    let rules = input::read_rules(path, format)?;
    Ok(processing::de_duplicate_rules(rules, family))
}

/// Run one expansion as described by `config`, writing lines to `out`.
///
/// # Returns
/// The number of lines written.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<usize, Box<dyn Error>> {
    let set = get_rule_set(&config.file, config.input_format, config.family)?;
    match config.mode {
        OutputMode::Ranges => output::write_ranges(out, &set),
        OutputMode::Subnets => output::write_subnets(out, &set, config.max_subnets),
    }
}

//! Command line and environment configuration.

use crate::input::InputFormat;
use crate::models::Family;
use crate::output::OutputMode;
use clap::{Parser, ValueEnum};

/// Default log4rs configuration file.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyArg {
    V4,
    V6,
}

impl From<FamilyArg> for Family {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::V4 => Family::V4,
            FamilyArg::V6 => Family::V6,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    #[default]
    Json,
    Ranges,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => InputFormat::Json,
            FormatArg::Ranges => InputFormat::Ranges,
        }
    }
}

/// Expand prefix range rules into subnets or de-duplicated range lines.
#[derive(Parser, Debug)]
#[command(name = "prefix-expand", version)]
pub struct Cli {
    /// Rule file to read
    pub file: String,

    /// Print one <prefix>,<lower>,<upper> line per distinct rule instead of subnets
    #[arg(long)]
    pub ranges: bool,

    /// Only keep rules of this address family
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,

    /// Fail without output if the expansion would exceed this many subnets
    #[arg(long, env = "PREFIX_EXPAND_MAX_SUBNETS")]
    pub max_subnets: Option<u128>,

    /// Format of the rule file
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    pub input_format: FormatArg,

    /// log4rs YAML config; a stderr logger is used when the file is missing
    #[arg(long, env = "PREFIX_EXPAND_LOG_CONFIG", default_value = DEFAULT_LOG_CONFIG)]
    pub log_config: String,
}

/// Resolved run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: String,
    pub mode: OutputMode,
    pub family: Option<Family>,
    pub max_subnets: Option<u128>,
    pub input_format: InputFormat,
    pub log_config: String,
}

impl Config {
    /// Config for reading a JSON rule file with every option at its default.
    pub fn new(file: &str, mode: OutputMode) -> Config {
        Config {
            file: file.to_string(),
            mode,
            family: None,
            max_subnets: None,
            input_format: InputFormat::Json,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            file: cli.file,
            mode: if cli.ranges {
                OutputMode::Ranges
            } else {
                OutputMode::Subnets
            },
            family: cli.family.map(Family::from),
            max_subnets: cli.max_subnets,
            input_format: cli.input_format.into(),
            log_config: cli.log_config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Cli::try_parse_from(args).expect("Error parsing args").into()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["prefix-expand", "rules.json"]);
        assert_eq!(config.file, "rules.json");
        assert_eq!(config.mode, OutputMode::Subnets);
        assert_eq!(config.family, None);
        assert_eq!(config.input_format, InputFormat::Json);
    }

    #[test]
    fn test_ranges_flag() {
        let config = parse(&["prefix-expand", "--ranges", "rules.json"]);
        assert_eq!(config.mode, OutputMode::Ranges);
    }

    #[test]
    fn test_all_options() {
        let config = parse(&[
            "prefix-expand",
            "rules.txt",
            "--family",
            "v6",
            "--max-subnets",
            "1000",
            "--input-format",
            "ranges",
            "--log-config",
            "other.yml",
        ]);
        assert_eq!(config.family, Some(Family::V6));
        assert_eq!(config.max_subnets, Some(1000));
        assert_eq!(config.input_format, InputFormat::Ranges);
        assert_eq!(config.log_config, "other.yml");
    }

    #[test]
    fn test_missing_file_arg() {
        assert!(Cli::try_parse_from(["prefix-expand"]).is_err());
        assert!(Cli::try_parse_from(["prefix-expand", "f.json", "--family", "v5"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

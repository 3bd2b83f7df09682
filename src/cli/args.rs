//! Command-line argument definitions for jetstats
//!
//! This module defines the complete CLI interface using clap derive API.
//! Settings shared by every subcommand live in [`GlobalArgs`] and may be
//! given before or after the subcommand name.

use crate::app::models::{Dimension, Period, Quantity, Scale};
use crate::app::services::unit_formatter::UnitBase;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the private-aviation statistics tool
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jetstats",
    version,
    about = "Load and summarize published private-aviation statistics",
    long_about = "Fetches the pre-aggregated private jet datasets (aircraft models, the \
                  private aircraft register, activity time series, per-country and per-model \
                  rankings and flight positions) and prints them as tables, JSON or CSV. \
                  Also exposes the permissive delimited-text parser and the SI/IEC unit \
                  formatter used to build them."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a delimited text file and print its rows or records
    Parse(ParseArgs),
    /// Fuel consumption per aircraft model, averaged over all sources
    Models(ModelsArgs),
    /// Private aircraft register for a month
    Aircraft(AircraftArgs),
    /// Activity time series by day, month or year
    Timeline(TimelineArgs),
    /// Rank countries or models by one quantity
    Compare(CompareArgs),
    /// Flight positions of one aircraft
    Positions(PositionsArgs),
    /// Scale amounts into prefixed human-readable strings
    Format(FormatArgs),
}

/// Settings accepted by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct GlobalArgs {
    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/jetstats/config.json and uses defaults when absent.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Root URL of the object store holding the datasets
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Read datasets from a local directory laid out like the object store
    #[arg(long = "source-dir", value_name = "PATH", global = true)]
    pub source_dir: Option<PathBuf>,

    /// Reject rows whose field count differs from the header
    #[arg(long = "strict", global = true)]
    pub strict: bool,

    /// Base used to pick unit prefixes (1000/decimal or 1024/binary)
    #[arg(long = "unit-base", value_name = "BASE", global = true)]
    pub unit_base: Option<UnitBase>,

    /// Use IEC prefix symbols (Ki, Mi, ...) instead of SI ones
    #[arg(long = "iec", global = true)]
    pub iec: bool,

    /// Output format for results
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only warnings and errors are logged and no spinner is shown.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress logging except warnings and errors"
    )]
    pub quiet: bool,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Input file; reads standard input when omitted or "-"
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Field delimiter (escapes such as \t are accepted)
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<String>,

    /// Quote character
    #[arg(long = "quotechar", value_name = "CHAR")]
    pub quotechar: Option<String>,

    /// Row terminator; disables line-ending normalization when given
    #[arg(long = "lineterminator", value_name = "CHAR")]
    pub lineterminator: Option<String>,

    /// Keep whitespace around unquoted fields
    #[arg(long = "no-trim")]
    pub no_trim: bool,

    /// Treat a doubled quote as two separate quote characters
    #[arg(long = "no-doublequote")]
    pub no_doublequote: bool,

    /// Rows dropped from the front of the output
    #[arg(long = "skip-rows", value_name = "COUNT")]
    pub skip_rows: Option<usize>,

    /// Additional dialect option, repeatable
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Expected header; when given rows are validated and zipped into records
    #[arg(short = 'k', long = "keys", value_name = "LIST", value_delimiter = ',')]
    pub keys: Vec<String>,
}

/// Arguments for the models command
#[derive(Debug, Clone, Parser)]
pub struct ModelsArgs {
    /// Only models whose name contains this text (case-insensitive)
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Sort by consumption, highest first, instead of database order
    #[arg(long = "by-gph")]
    pub by_gph: bool,

    /// Maximum number of models shown
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,

    /// List every source instead of a source count
    #[arg(long = "sources")]
    pub show_sources: bool,
}

/// Arguments for the aircraft command
#[derive(Debug, Clone, Parser)]
pub struct AircraftArgs {
    /// Month of the register (YYYY-MM); defaults to the configured month
    #[arg(short = 'm', long = "month", value_name = "MONTH")]
    pub month: Option<String>,

    /// Only aircraft registered in this country
    #[arg(long = "country", value_name = "NAME")]
    pub country: Option<String>,

    /// Only aircraft of this model
    #[arg(long = "model", value_name = "NAME")]
    pub model: Option<String>,

    /// Maximum number of aircraft shown
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,
}

/// Arguments for the timeline command
#[derive(Debug, Clone, Parser)]
pub struct TimelineArgs {
    /// Bucket size: by_day, by_month or by_year
    #[arg(short = 's', long = "scale", value_name = "SCALE", default_value = "by_month")]
    pub scale: Scale,

    /// Quantities to show; all of them when omitted
    #[arg(long = "quantity", value_name = "NAME", value_delimiter = ',')]
    pub quantities: Vec<Quantity>,

    /// Only buckets in this year
    #[arg(short = 'y', long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Print plain numbers instead of prefixed amounts
    #[arg(long = "raw")]
    pub raw: bool,
}

/// Arguments for the compare command
#[derive(Debug, Clone, Parser)]
pub struct CompareArgs {
    /// What to rank: country or model
    #[arg(short = 'd', long = "dimension", value_name = "DIMENSION", default_value = "country")]
    pub dimension: Dimension,

    /// Bucket size of the source dataset: month or year
    #[arg(short = 'p', long = "period", value_name = "PERIOD", default_value = "year")]
    pub period: Period,

    /// Quantity ranked on
    #[arg(long = "quantity", value_name = "NAME", default_value = "co2_emitted")]
    pub quantity: Quantity,

    /// Year compared; defaults to the most recent one in the data
    #[arg(short = 'y', long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Maximum number of rows; defaults to the configured rank limit
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Rename countries to their world atlas names
    #[arg(long = "atlas-names")]
    pub atlas_names: bool,

    /// Print plain numbers instead of prefixed amounts
    #[arg(long = "raw")]
    pub raw: bool,
}

/// Arguments for the positions command
#[derive(Debug, Clone, Parser)]
pub struct PositionsArgs {
    /// ICAO transponder address of the aircraft (hex)
    #[arg(value_name = "ICAO")]
    pub icao_number: String,

    /// Month of the positions (YYYY-MM); defaults to the configured month
    #[arg(short = 'm', long = "month", value_name = "MONTH")]
    pub month: Option<String>,
}

/// Arguments for the format command
#[derive(Debug, Clone, Parser)]
pub struct FormatArgs {
    /// Amounts to scale
    #[arg(value_name = "AMOUNT", required = true, allow_negative_numbers = true)]
    pub amounts: Vec<f64>,

    /// Unit appended after the prefix (e.g. "g" or "B")
    #[arg(short = 'u', long = "unit", value_name = "UNIT", default_value = "")]
    pub unit: String,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table for terminals
    Table,
    /// JSON for scripting
    Json,
    /// CSV for spreadsheets and data analysis
    Csv,
}

impl GlobalArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ParseArgs {
    /// Collect the dialect flags as `(name, value)` pairs
    ///
    /// Dedicated flags come after `--option` pairs so they win on conflict.
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if an `--option` is not `KEY=VALUE`
    pub fn dialect_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();

        for option in &self.options {
            let (key, value) = option.split_once('=').ok_or_else(|| {
                Error::configuration(format!(
                    "Dialect option '{}' must look like KEY=VALUE",
                    option
                ))
            })?;
            pairs.push((key.trim().to_string(), unescape(value)));
        }

        if let Some(delimiter) = &self.delimiter {
            pairs.push(("delimiter".to_string(), unescape(delimiter)));
        }
        if let Some(quotechar) = &self.quotechar {
            pairs.push(("quotechar".to_string(), unescape(quotechar)));
        }
        if let Some(lineterminator) = &self.lineterminator {
            pairs.push(("lineterminator".to_string(), unescape(lineterminator)));
        }
        if self.no_trim {
            pairs.push(("skipinitialspace".to_string(), "false".to_string()));
        }
        if self.no_doublequote {
            pairs.push(("doublequote".to_string(), "false".to_string()));
        }
        if let Some(rows) = self.skip_rows {
            pairs.push(("skipinitialrows".to_string(), rows.to_string()));
        }

        Ok(pairs)
    }
}

/// Expand the shell-friendly escapes `\t`, `\n`, `\r` and `\\`
fn unescape(value: &str) -> String {
    match value {
        "\\t" => "\t".to_string(),
        "\\n" => "\n".to_string(),
        "\\r" => "\r".to_string(),
        "\\\\" => "\\".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "jetstats",
            "timeline",
            "--scale",
            "by_year",
            "--strict",
            "--unit-base",
            "1000",
            "-f",
            "json",
        ])
        .unwrap();

        assert!(args.global.strict);
        assert_eq!(args.global.unit_base, Some(UnitBase::Decimal));
        assert_eq!(args.global.output_format, OutputFormat::Json);
        match args.command {
            Some(Commands::Timeline(timeline)) => assert_eq!(timeline.scale, Scale::ByYear),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_compare_defaults() {
        let args = Args::try_parse_from(["jetstats", "compare"]).unwrap();
        match args.command {
            Some(Commands::Compare(compare)) => {
                assert_eq!(compare.dimension, Dimension::Country);
                assert_eq!(compare.period, Period::Year);
                assert_eq!(compare.quantity, Quantity::Co2Emitted);
                assert_eq!(compare.limit, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_scale_rejected() {
        assert!(Args::try_parse_from(["jetstats", "timeline", "--scale", "weekly"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["jetstats", "-q", "-v", "models"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let args = Args::try_parse_from(["jetstats", "models"]).unwrap();
        assert_eq!(args.global.get_log_level(), "info");

        let args = Args::try_parse_from(["jetstats", "-vv", "models"]).unwrap();
        assert_eq!(args.global.get_log_level(), "trace");

        let args = Args::try_parse_from(["jetstats", "-q", "models"]).unwrap();
        assert_eq!(args.global.get_log_level(), "warn");
        assert!(!args.global.show_progress());
    }

    #[test]
    fn test_format_accepts_negative_amounts() {
        let args =
            Args::try_parse_from(["jetstats", "format", "-1536", "2048", "-u", "B"]).unwrap();
        match args.command {
            Some(Commands::Format(format)) => {
                assert_eq!(format.amounts, vec![-1536.0, 2048.0]);
                assert_eq!(format.unit, "B");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_dialect_pairs() {
        let args = Args::try_parse_from([
            "jetstats",
            "parse",
            "data.tsv",
            "-o",
            "quotechar='",
            "--delimiter",
            "\\t",
            "--no-trim",
            "--skip-rows",
            "2",
        ])
        .unwrap();

        let parse = match args.command {
            Some(Commands::Parse(parse)) => parse,
            other => panic!("unexpected command: {:?}", other),
        };
        let pairs = parse.dialect_pairs().unwrap();

        assert_eq!(
            pairs,
            vec![
                ("quotechar".to_string(), "'".to_string()),
                ("delimiter".to_string(), "\t".to_string()),
                ("skipinitialspace".to_string(), "false".to_string()),
                ("skipinitialrows".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_dialect_pairs_rejects_bare_option() {
        let args = Args::try_parse_from(["jetstats", "parse", "-o", "delimiter"]).unwrap();
        let Some(Commands::Parse(parse)) = args.command else {
            panic!("expected parse command");
        };
        assert!(matches!(
            parse.dialect_pairs(),
            Err(Error::Configuration { .. })
        ));
    }
}

//! Application constants for jetstats
//!
//! This module contains dataset locations, expected header layouts, dialect
//! defaults and the unit prefix table used throughout the library.

// =============================================================================
// Object Store Layout
// =============================================================================

/// Default base URL of the static object store holding all datasets
pub const DEFAULT_BASE_URL: &str = "https://private-jets.fra1.digitaloceanspaces.com/";

/// Model fuel consumption database
pub const MODEL_DB_PATH: &str = "model/db/data.csv";

/// Default month for the private aircraft register
pub const DEFAULT_AIRCRAFT_MONTH: &str = "2024-07";

/// Private aircraft register, one file per month
pub fn aircraft_path(month: &str) -> String {
    format!("private_aircraft/v1/month={}/data.csv", month)
}

/// Time-series aggregates, one file per scale (`by_day`, `by_month`, `by_year`)
pub fn timeseries_path(scale: &str) -> String {
    format!("analysis/v1/{}.csv", scale)
}

/// Per-dimension aggregates, one file per dimension and period
pub fn dimension_path(dimension: &str, period: &str) -> String {
    format!("analysis/v1/{}/by_{}.csv", dimension, period)
}

/// Flight positions of one aircraft for one month
pub fn positions_path(icao_number: &str, month: &str) -> String {
    format!(
        "position/icao_number={}/month={}/data.json",
        icao_number, month
    )
}

// =============================================================================
// Expected Header Layouts
// =============================================================================

/// Header of the model consumption database
pub const MODEL_KEYS: &[&str] = &["model", "gph", "source", "date"];

/// Header of the private aircraft register
pub const AIRCRAFT_KEYS: &[&str] = &[
    "icao_number",
    "tail_number",
    "type_designator",
    "model",
    "country",
];

/// Metric columns shared by every aggregate dataset
pub const METRIC_KEYS: &[&str] = &[
    "number_of_aircrafts",
    "number_of_legs",
    "time_flown",
    "co2_emitted",
    "km_flown",
    "km_travelled",
];

/// Header of the time-series aggregates
pub const TIMESERIES_KEYS: &[&str] = &[
    "date",
    "number_of_aircrafts",
    "number_of_legs",
    "time_flown",
    "co2_emitted",
    "km_flown",
    "km_travelled",
];

/// Header of a per-dimension aggregate file: `date`, the dimension, then metrics
pub fn dimension_keys(dimension: &str) -> Vec<&str> {
    let mut keys = Vec::with_capacity(METRIC_KEYS.len() + 2);
    keys.push("date");
    keys.push(dimension);
    keys.extend_from_slice(METRIC_KEYS);
    keys
}

// =============================================================================
// Dialect Defaults
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default quote character
pub const DEFAULT_QUOTE_CHAR: char = '"';

/// Default (and normalized) line terminator
pub const DEFAULT_LINE_TERMINATOR: char = '\n';

// =============================================================================
// Unit Prefixes
// =============================================================================

/// One entry of the magnitude prefix table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPrefix {
    /// Decimal prefix name (e.g. "kilo")
    pub prefix: &'static str,
    /// Decimal symbol (e.g. "k")
    pub symbol: &'static str,
    /// Binary prefix name (e.g. "kibi")
    pub iec_prefix: &'static str,
    /// Binary symbol (e.g. "Ki")
    pub iec_symbol: &'static str,
}

/// Prefix table indexed by exponent, from unscaled up to yotta/yobi
pub const UNIT_PREFIXES: &[UnitPrefix] = &[
    UnitPrefix { prefix: "", symbol: "", iec_prefix: "", iec_symbol: "" },
    UnitPrefix { prefix: "kilo", symbol: "k", iec_prefix: "kibi", iec_symbol: "Ki" },
    UnitPrefix { prefix: "mega", symbol: "M", iec_prefix: "mebi", iec_symbol: "Mi" },
    UnitPrefix { prefix: "giga", symbol: "G", iec_prefix: "gibi", iec_symbol: "Gi" },
    UnitPrefix { prefix: "tera", symbol: "T", iec_prefix: "tebi", iec_symbol: "Ti" },
    UnitPrefix { prefix: "peta", symbol: "P", iec_prefix: "pebi", iec_symbol: "Pi" },
    UnitPrefix { prefix: "exa", symbol: "E", iec_prefix: "exbi", iec_symbol: "Ei" },
    UnitPrefix { prefix: "zetta", symbol: "Z", iec_prefix: "zebi", iec_symbol: "Zi" },
    UnitPrefix { prefix: "yotta", symbol: "Y", iec_prefix: "yobi", iec_symbol: "Yi" },
];

// =============================================================================
// Network Defaults
// =============================================================================

/// Per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Retries after the first attempt for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Backoff before the first retry, doubled on each subsequent retry
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Default number of rows shown by ranking commands
pub const DEFAULT_RANK_LIMIT: usize = 30;

// =============================================================================
// Map Naming
// =============================================================================

/// Dataset country names that differ from the world-atlas geography names
pub const ATLAS_COUNTRY_NAMES: &[(&str, &str)] = &[
    ("Bosnia and Herzegovina", "Bosnia and Herz."),
    ("Cayman Islands", "Cayman Is."),
    ("Cote d'Ivoire", "Côte d'Ivoire"),
    ("DR Congo", "Dem. Rep. Congo"),
    ("Dominican Republic", "Dominican Rep."),
    ("Equatorial Guinea", "Eq. Guinea"),
    ("Kingdom of the Netherlands", "Netherlands"),
    ("United States", "United States of America"),
    ("Viet Nam", "Vietnam"),
    ("Libyan Arab Jamahiriya", "Libya"),
];

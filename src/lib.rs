//! jetstats Library
//!
//! A Rust library for loading the pre-aggregated private-aviation statistics
//! published as static CSV/JSON files, and turning them into typed records
//! ready for tables, charts and maps.
//!
//! This library provides tools for:
//! - Parsing delimited text with a permissive, dialect-driven tokenizer
//! - Validating dataset headers and zipping rows into records
//! - Grouping records by key and folding them into per-key means
//! - Scaling magnitudes into human-readable SI/IEC prefixed strings
//! - Fetching datasets over HTTP (or from a local mirror) with retries

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod datasets;
        pub mod delimited_parser;
        pub mod record_deserializer;
        pub mod reshape;
        pub mod unit_formatter;
    }
    pub mod adapters;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod output;
}

// Re-export commonly used types
pub use app::models::{Aircraft, AircraftModel, Aggregate, Position, Record, Row, Source, Value};
pub use app::services::delimited_parser::{Dialect, DialectOptions, parse};
pub use app::services::record_deserializer::{RecordDeserializer, RowMode, deserialize};
pub use app::services::unit_formatter::{PrefixStyle, UnitBase, UnitFormatter};
pub use config::Config;

/// Result type alias for jetstats
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loading, validating and formatting dashboard data
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Header row does not match the dataset's expected keys
    #[error("Schema mismatch: expected header [{}], found [{}]", .expected.join(","), .found.join(","))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Data row length differs from the header (strict mode only)
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Unsupported or contradictory dialect option
    #[error("Malformed dialect: {message}")]
    MalformedDialect { message: String },

    /// Value too large (or not finite) for the unit prefix table
    #[error("Unsupported magnitude: {amount} is outside the unit prefix table")]
    UnsupportedMagnitude { amount: f64 },

    /// Record could not be converted into its typed form
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Request could not be completed
    #[error("Transport error fetching '{url}': {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Server answered with a non-success status
    #[error("HTTP status {status} fetching '{url}'")]
    HttpStatus { url: String, status: u16 },

    /// JSON decoding or encoding failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV output failed
    #[error("CSV writing error: {message}")]
    CsvWriting {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a schema mismatch error
    pub fn schema_mismatch(expected: &[&str], found: Vec<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.iter().map(|k| k.to_string()).collect(),
            found,
        }
    }

    /// Create a row length mismatch error
    pub fn row_length_mismatch(row: usize, expected: usize, found: usize) -> Self {
        Self::RowLengthMismatch {
            row,
            expected,
            found,
        }
    }

    /// Create a malformed dialect error
    pub fn malformed_dialect(message: impl Into<String>) -> Self {
        Self::MalformedDialect {
            message: message.into(),
        }
    }

    /// Create an unsupported magnitude error
    pub fn unsupported_magnitude(amount: f64) -> Self {
        Self::UnsupportedMagnitude { amount }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a transport error with context
    pub fn transport(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV writing error with context
    pub fn csv_writing(message: impl Into<String>, source: csv::Error) -> Self {
        Self::CsvWriting {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether a retry could plausibly succeed
    ///
    /// Timeouts, connection failures, 429 and 5xx responses are transient;
    /// everything else is final.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source
                .as_ref()
                .map(|e| e.is_timeout() || e.is_connect() || e.is_request())
                .unwrap_or(false),
            Self::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvWriting {
            message: "CSV output failed".to_string(),
            source: error,
        }
    }
}

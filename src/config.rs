//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! command-line overrides applied through the `with_*` builders.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::adapters::{DataSource, HttpSource, RetryPolicy};
use crate::app::services::record_deserializer::{RecordDeserializer, RowMode};
use crate::app::services::unit_formatter::{PrefixStyle, UnitBase, UnitFormatter};
use crate::constants::{
    DEFAULT_AIRCRAFT_MONTH, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_RANK_LIMIT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
};
use crate::{Error, Result};

/// File name looked up under the user configuration directory
const CONFIG_FILE_NAME: &str = "config.json";

/// Runtime configuration for fetching, decoding and formatting datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the object store
    pub base_url: String,

    /// Read datasets from this directory instead of the object store
    pub source_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retries after a transient failure
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds
    pub retry_backoff_ms: u64,

    /// How rows with the wrong number of fields are handled
    pub row_mode: RowMode,

    pub unit_base: UnitBase,

    pub prefix_style: PrefixStyle,

    /// Month of the aircraft register used when none is given (`YYYY-MM`)
    pub aircraft_month: String,

    /// Rows kept when ranking countries or models
    pub rank_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            source_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            row_mode: RowMode::default(),
            unit_base: UnitBase::default(),
            prefix_style: PrefixStyle::default(),
            aircraft_month: DEFAULT_AIRCRAFT_MONTH.to_string(),
            rank_limit: DEFAULT_RANK_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicit path must exist. The default location
    /// (`<config dir>/jetstats/config.json`) is optional and falls back to
    /// the built-in defaults when absent.
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::Configuration` if the file is not valid configuration JSON
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !required && !path.exists() {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::io(
                format!("Failed to read configuration file {}", path.display()),
                e,
            )
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid configuration in {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jetstats").join(CONFIG_FILE_NAME))
    }

    /// Check that the settings are usable
    ///
    /// # Errors
    /// * Returns `Error::Configuration` naming the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.is_none()
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(Error::configuration(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::configuration(
                "request_timeout_secs must be greater than zero",
            ));
        }
        if !is_month(&self.aircraft_month) {
            return Err(Error::configuration(format!(
                "aircraft_month must look like YYYY-MM, got '{}'",
                self.aircraft_month
            )));
        }
        if self.rank_limit == 0 {
            return Err(Error::configuration("rank_limit must be greater than zero"));
        }
        Ok(())
    }

    /// Set the object store root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read datasets from a local mirror
    pub fn with_source_dir(mut self, source_dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(source_dir.into());
        self
    }

    pub fn with_row_mode(mut self, row_mode: RowMode) -> Self {
        self.row_mode = row_mode;
        self
    }

    /// Reject rows with the wrong number of fields
    pub fn with_strict_rows(self) -> Self {
        self.with_row_mode(RowMode::Strict)
    }

    pub fn with_unit_base(mut self, unit_base: UnitBase) -> Self {
        self.unit_base = unit_base;
        self
    }

    pub fn with_prefix_style(mut self, prefix_style: PrefixStyle) -> Self {
        self.prefix_style = prefix_style;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_aircraft_month(mut self, month: impl Into<String>) -> Self {
        self.aircraft_month = month.into();
        self
    }

    pub fn with_rank_limit(mut self, limit: usize) -> Self {
        self.rank_limit = limit;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    pub fn deserializer(&self) -> RecordDeserializer {
        RecordDeserializer::new(self.row_mode)
    }

    pub fn formatter(&self) -> UnitFormatter {
        UnitFormatter::new(self.unit_base, self.prefix_style)
    }

    /// Build the data source these settings point at
    ///
    /// # Errors
    /// * Returns `Error::Transport` if the HTTP client cannot be built
    pub fn data_source(&self) -> Result<DataSource> {
        match &self.source_dir {
            Some(dir) => Ok(DataSource::local(dir.clone())),
            None => Ok(DataSource::Remote(HttpSource::from_config(self)?)),
        }
    }
}

fn is_month(value: &str) -> bool {
    match value.split_once('-') {
        Some((year, month)) => {
            year.len() == 4
                && year.bytes().all(|b| b.is_ascii_digit())
                && month.len() == 2
                && month.parse::<u32>().is_ok_and(|m| (1..=12).contains(&m))
        }
        None => false,
    }
}

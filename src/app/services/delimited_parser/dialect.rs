//! Dialect options and resolution
//!
//! Callers pass a sparse set of overrides ([`DialectOptions`]); each parse
//! call resolves them over the defaults into an immutable [`Dialect`].

use crate::constants::{DEFAULT_DELIMITER, DEFAULT_LINE_TERMINATOR, DEFAULT_QUOTE_CHAR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Caller-supplied dialect overrides; `None` keeps the default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectOptions {
    pub delimiter: Option<char>,

    pub quotechar: Option<char>,

    /// Explicit terminator; when set the input is not normalized
    pub lineterminator: Option<char>,

    /// Treat a doubled quote inside a quoted field as a literal quote
    pub doublequote: Option<bool>,

    /// Trim whitespace around unquoted fields
    #[serde(alias = "trim")]
    pub skipinitialspace: Option<bool>,

    /// Rows dropped from the front of the output
    pub skipinitialrows: Option<usize>,
}

impl DialectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_quotechar(mut self, quotechar: char) -> Self {
        self.quotechar = Some(quotechar);
        self
    }

    pub fn with_lineterminator(mut self, lineterminator: char) -> Self {
        self.lineterminator = Some(lineterminator);
        self
    }

    pub fn with_doublequote(mut self, doublequote: bool) -> Self {
        self.doublequote = Some(doublequote);
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.skipinitialspace = Some(trim);
        self
    }

    pub fn with_skip_rows(mut self, rows: usize) -> Self {
        self.skipinitialrows = Some(rows);
        self
    }

    /// Set an option by name
    ///
    /// Names are case-insensitive and `trim` is accepted as the legacy name
    /// of `skipinitialspace`. Unknown names are ignored with a warning.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.to_lowercase();
        match key.as_str() {
            "delimiter" => self.delimiter = Some(single_char(&key, value)?),
            "quotechar" => self.quotechar = Some(single_char(&key, value)?),
            "lineterminator" => self.lineterminator = Some(single_char(&key, value)?),
            "doublequote" => self.doublequote = Some(parse_bool(&key, value)?),
            "trim" | "skipinitialspace" => self.skipinitialspace = Some(parse_bool(&key, value)?),
            "skipinitialrows" => {
                let rows = value.trim().parse().map_err(|_| {
                    Error::malformed_dialect(format!(
                        "skipinitialrows must be a non-negative integer, got '{}'",
                        value
                    ))
                })?;
                self.skipinitialrows = Some(rows);
            }
            _ => warn!("Ignoring unknown dialect option '{}'", key),
        }
        Ok(())
    }

    /// Build options from `(name, value)` pairs, later pairs winning
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.set(key, value)?;
        }
        Ok(options)
    }

    /// Merge over the defaults and validate
    pub fn resolve(&self) -> Result<Dialect> {
        let dialect = Dialect {
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
            quotechar: self.quotechar.unwrap_or(DEFAULT_QUOTE_CHAR),
            lineterminator: self.lineterminator.unwrap_or(DEFAULT_LINE_TERMINATOR),
            doublequote: self.doublequote.unwrap_or(true),
            skipinitialspace: self.skipinitialspace.unwrap_or(true),
            skipinitialrows: self.skipinitialrows.unwrap_or(0),
        };
        dialect.validate()?;
        Ok(dialect)
    }
}

/// Fully resolved lexical rules for one parse call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: char,
    pub quotechar: char,
    pub lineterminator: char,
    pub doublequote: bool,
    pub skipinitialspace: bool,
    pub skipinitialrows: usize,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quotechar: DEFAULT_QUOTE_CHAR,
            lineterminator: DEFAULT_LINE_TERMINATOR,
            doublequote: true,
            skipinitialspace: true,
            skipinitialrows: 0,
        }
    }
}

impl Dialect {
    /// Reject dialects whose special characters collide
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quotechar {
            return Err(Error::malformed_dialect(format!(
                "delimiter and quotechar are both {:?}",
                self.delimiter
            )));
        }
        if self.delimiter == self.lineterminator {
            return Err(Error::malformed_dialect(format!(
                "delimiter and lineterminator are both {:?}",
                self.delimiter
            )));
        }
        if self.quotechar == self.lineterminator {
            return Err(Error::malformed_dialect(format!(
                "quotechar and lineterminator are both {:?}",
                self.quotechar
            )));
        }
        Ok(())
    }
}

fn single_char(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Err(Error::malformed_dialect(format!("{} must not be empty", key))),
        (Some(_), Some(_)) => Err(Error::malformed_dialect(format!(
            "{} must be a single character, got {:?}",
            key, value
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::malformed_dialect(format!(
            "{} must be a boolean, got '{}'",
            key, value
        ))),
    }
}

//! Delimited-text parser for the published CSV datasets
//!
//! This module turns a raw text blob into rows of typed scalar values.
//! Malformed quoting never fails; an unterminated quote runs to the end of
//! the input. Empty input still yields one row holding a single null field.
//!
//! ## Architecture
//!
//! - [`dialect`] - Dialect options, defaults and validation
//! - [`parser`] - Line-terminator normalization, chomping and the scanner
//! - [`field_coercion`] - Null/trim/number coercion of unquoted fields
//!
//! ## Usage
//!
//! ```rust
//! use jetstats::app::models::Value;
//! use jetstats::app::services::delimited_parser::parse;
//!
//! # fn example() -> jetstats::Result<()> {
//! let rows = parse("model,gph\r\nPC-12,66\r\n", None)?;
//! assert_eq!(rows[1], vec![Value::Text("PC-12".to_string()), Value::Int(66)]);
//! # Ok(())
//! # }
//! ```

pub mod dialect;
pub mod field_coercion;
pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use dialect::{Dialect, DialectOptions};
pub use field_coercion::coerce_field;
pub use parser::{chomp, normalize_line_terminators, parse};

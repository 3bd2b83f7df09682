//! Core delimited-text scanner
//!
//! This module handles line-terminator normalization, removal of a single
//! trailing terminator, and the character-by-character scan that splits the
//! text into rows and fields.

use std::borrow::Cow;
use tracing::debug;

use super::dialect::{Dialect, DialectOptions};
use super::field_coercion::coerce_field;
use crate::Result;
use crate::app::models::Row;

/// UTF-8 byte order mark as decoded into a `char`
pub(crate) const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse delimited text into rows of typed values
///
/// When `options` leaves the line terminator unset, every `\r\n`, `\n` and
/// `\r` is first rewritten to `\n`; an explicit terminator disables that
/// rewrite, so mixed terminators are only handled in the default mode.
///
/// A leading byte order mark is dropped before anything else.
///
/// Exactly one trailing terminator is ignored. The final field and row are
/// always flushed, so the result is never empty: `""` parses to one row with
/// a single [`Value::Null`](crate::app::models::Value::Null).
///
/// # Errors
/// * Returns `Error::MalformedDialect` if the options do not resolve to a
///   usable dialect. Malformed quoting is never an error.
pub fn parse(text: &str, options: Option<&DialectOptions>) -> Result<Vec<Row>> {
    let explicit_terminator = options.and_then(|o| o.lineterminator).is_some();
    let dialect = match options {
        Some(options) => options.resolve()?,
        None => Dialect::default(),
    };

    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let text = if explicit_terminator {
        Cow::Borrowed(text)
    } else {
        normalize_line_terminators(text)
    };
    let body = chomp(&text, dialect.lineterminator);

    let mut rows = scan(body, &dialect);

    if dialect.skipinitialrows > 0 {
        let skip = dialect.skipinitialrows.min(rows.len());
        rows.drain(..skip);
    }

    debug!(
        "Parsed {} rows from {} bytes (delimiter {:?})",
        rows.len(),
        body.len(),
        dialect.delimiter
    );

    Ok(rows)
}

/// Rewrite `\r\n` and lone `\r` to `\n`
///
/// Borrows the input untouched when it holds no carriage return, which makes
/// normalizing already-normalized text free.
pub fn normalize_line_terminators(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Remove a single trailing terminator, if present
pub fn chomp(text: &str, lineterminator: char) -> &str {
    text.strip_suffix(lineterminator).unwrap_or(text)
}

fn scan(text: &str, dialect: &Dialect) -> Vec<Row> {
    let mut out: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut in_quote = false;
    let mut field_quoted = false;

    let mut chars = text.chars().peekable();
    while let Some(cur) = chars.next() {
        if !in_quote && (cur == dialect.delimiter || cur == dialect.lineterminator) {
            row.push(coerce_field(
                std::mem::take(&mut field),
                field_quoted,
                dialect.skipinitialspace,
            ));
            if cur == dialect.lineterminator {
                out.push(std::mem::take(&mut row));
            }
            field_quoted = false;
        } else if cur != dialect.quotechar {
            field.push(cur);
        } else if !in_quote {
            in_quote = true;
            field_quoted = true;
        } else if dialect.doublequote && chars.peek() == Some(&dialect.quotechar) {
            field.push(dialect.quotechar);
            chars.next();
        } else {
            in_quote = false;
        }
    }

    // An unterminated quote lands here with everything after it in `field`
    row.push(coerce_field(field, field_quoted, dialect.skipinitialspace));
    out.push(row);

    out
}

//! Post-processing of scanned fields
//!
//! Only unquoted fields are touched: empty becomes null, whitespace is
//! trimmed when the dialect asks for it, and plain integers and decimals
//! become numbers. Quoted fields are returned verbatim as text.

use super::parser::BYTE_ORDER_MARK;
use crate::app::models::Value;
use regex::Regex;
use std::sync::LazyLock;

/// ASCII digits only; no sign, no exponent
static INT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid integer pattern"));

/// Digits with a decimal point and digits on at least one side
static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]*\.[0-9]+$|^[0-9]+\.[0-9]*$").expect("valid decimal pattern")
});

/// Turn a raw field buffer into a [`Value`]
///
/// The empty check runs before trimming, so a whitespace-only unquoted field
/// ends up as empty text rather than null. Trimming also strips stray byte
/// order marks.
pub fn coerce_field(raw: String, quoted: bool, trim: bool) -> Value {
    if quoted {
        return Value::Text(raw);
    }
    if raw.is_empty() {
        return Value::Null;
    }

    let field = if trim {
        let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
        if trimmed.len() == raw.len() {
            raw
        } else {
            trimmed.to_string()
        }
    } else {
        raw
    };

    if INT_PATTERN.is_match(&field) {
        // Digit strings too long for i64 still read as numbers
        return match field.parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => field.parse::<f64>().map(Value::Float).unwrap_or(Value::Text(field)),
        };
    }
    if FLOAT_PATTERN.is_match(&field) {
        if let Ok(f) = field.parse::<f64>() {
            return Value::Float(f);
        }
    }

    Value::Text(field)
}

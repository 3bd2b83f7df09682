//! Tests for field coercion rules

use super::super::field_coercion::coerce_field;
use super::text;
use crate::app::models::Value;

fn unquoted(raw: &str) -> Value {
    coerce_field(raw.to_string(), false, true)
}

#[test]
fn test_integers() {
    assert_eq!(unquoted("0"), Value::Int(0));
    assert_eq!(unquoted("0042"), Value::Int(42));
    assert_eq!(unquoted(" 7 "), Value::Int(7));
}

#[test]
fn test_decimals() {
    assert_eq!(unquoted("1.5"), Value::Float(1.5));
    assert_eq!(unquoted(".25"), Value::Float(0.25));
    assert_eq!(unquoted("3."), Value::Float(3.0));
}

#[test]
fn test_signs_and_exponents_stay_text() {
    assert_eq!(unquoted("-5"), text("-5"));
    assert_eq!(unquoted("+5"), text("+5"));
    assert_eq!(unquoted("1e5"), text("1e5"));
    assert_eq!(unquoted("."), text("."));
    assert_eq!(unquoted("1.2.3"), text("1.2.3"));
}

#[test]
fn test_non_ascii_digits_stay_text() {
    assert_eq!(unquoted("٣"), text("٣"));
}

#[test]
fn test_integer_overflow_falls_back_to_float() {
    assert_eq!(unquoted("99999999999999999999"), Value::Float(1e20));
}

#[test]
fn test_empty_is_null_only_when_unquoted() {
    assert_eq!(unquoted(""), Value::Null);
    assert_eq!(coerce_field(String::new(), true, true), text(""));
}

#[test]
fn test_quoted_fields_are_verbatim() {
    assert_eq!(coerce_field(" 12 ".to_string(), true, true), text(" 12 "));
}

#[test]
fn test_no_trim_flag() {
    assert_eq!(coerce_field(" 12".to_string(), false, false), text(" 12"));
    assert_eq!(coerce_field("12".to_string(), false, false), Value::Int(12));
}

#[test]
fn test_trim_strips_byte_order_marks() {
    assert_eq!(unquoted("\u{feff}12"), Value::Int(12));
    assert_eq!(coerce_field("\u{feff}a".to_string(), false, false), text("\u{feff}a"));
}

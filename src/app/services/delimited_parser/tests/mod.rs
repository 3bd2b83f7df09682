//! Test utilities for the delimited-text parser
//!
//! This module provides shared fixtures and value constructors used across
//! the parser test modules.

use crate::app::models::Value;

// Test modules
mod coercion_tests;

/// Shorthand for a text value
pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

/// Model consumption database snippet with CRLF terminators and a quoted URL
pub fn create_model_db_csv() -> String {
    "model,gph,source,date\r\n\
     Citation Excel,186,\"https://example.org/specs?a=1,b=2\",2024-01-15\r\n\
     PC-12,66.5,https://example.org/pc12,2024-02-01\r\n"
        .to_string()
}

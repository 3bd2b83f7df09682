//! Tests for unit scaling and formatting

//! Tests for header validation and record construction

use super::super::deserializer::{RecordDeserializer, RowMode, deserialize, deserialize_as};
use super::create_timeseries_csv;
use crate::Error;
use crate::app::models::{Aggregate, RawAircraftModel, Value};
use crate::constants::{MODEL_KEYS, TIMESERIES_KEYS};

#[test]
fn test_simple_record_with_coercion() {
    let records = deserialize("a,b\n1,x", &["a", "b"]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("a"), Some(&Value::Int(1)));
    assert_eq!(records[0].get("b"), Some(&Value::Text("x".to_string())));
    assert_eq!(
        serde_json::to_value(&records[0]).unwrap(),
        serde_json::json!({"a": 1, "b": "x"})
    );
}

#[test]
fn test_header_only_yields_no_records() {
    let records = deserialize("a,b\n", &["a", "b"]).unwrap();

    assert!(records.is_empty());
}

#[test]
fn test_schema_mismatch_is_an_error() {
    let err = deserialize("a,b\n1,2", &["a", "c"]).unwrap_err();

    match err {
        Error::SchemaMismatch { expected, found } => {
            assert_eq!(expected, vec!["a", "c"]);
            assert_eq!(found, vec!["a", "b"]);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_header_after_byte_order_mark_matches() {
    let records = deserialize("\u{feff}a,b\n1,x\n", &["a", "b"]).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("a"), Some(&Value::Int(1)));
    assert_eq!(records[0].get("b"), Some(&Value::Text("x".to_string())));
}

#[test]
fn test_header_order_matters() {
    assert!(matches!(
        deserialize("b,a\n1,2", &["a", "b"]),
        Err(Error::SchemaMismatch { .. })
    ));
}

#[test]
fn test_header_length_matters() {
    assert!(matches!(
        deserialize("a,b,c\n1,2,3", &["a", "b"]),
        Err(Error::SchemaMismatch { .. })
    ));
}

#[test]
fn test_empty_input_is_schema_mismatch() {
    let err = deserialize("", &["a"]).unwrap_err();

    // The single null header field stringifies to ""
    match err {
        Error::SchemaMismatch { found, .. } => assert_eq!(found, vec![String::new()]),
        other => panic!("expected SchemaMismatch, got {:?}", other),
    }
}

#[test]
fn test_numeric_header_is_stringified() {
    let records = deserialize("year,2023\nco2,5", &["year", "2023"]).unwrap();

    assert_eq!(records[0].get("2023"), Some(&Value::Int(5)));
}

#[test]
fn test_lenient_mode_pads_and_truncates() {
    let records = deserialize("a,b,c\n1\n1,2,3,4", &["a", "b", "c"]).unwrap();

    assert_eq!(
        records[0].values(),
        &[Value::Int(1), Value::Null, Value::Null]
    );
    assert_eq!(
        records[1].values(),
        &[Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn test_strict_mode_rejects_short_rows() {
    let deserializer = RecordDeserializer::new(RowMode::Strict);
    let err = deserializer
        .deserialize("a,b\n1,2\n3", &["a", "b"])
        .unwrap_err();

    match err {
        Error::RowLengthMismatch {
            row,
            expected,
            found,
        } => {
            assert_eq!(row, 2);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
        }
        other => panic!("expected RowLengthMismatch, got {:?}", other),
    }
}

#[test]
fn test_strict_mode_accepts_well_formed_input() {
    let deserializer = RecordDeserializer::new(RowMode::Strict);
    let records = deserializer
        .deserialize(&create_timeseries_csv(), TIMESERIES_KEYS)
        .unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_records_keep_header_order() {
    let records = deserialize(&create_timeseries_csv(), TIMESERIES_KEYS).unwrap();

    let keys: Vec<&str> = records[0].keys().iter().map(String::as_str).collect();
    assert_eq!(keys, TIMESERIES_KEYS);
}

#[test]
fn test_typed_aggregates() {
    let aggregates: Vec<Aggregate> =
        deserialize_as(&create_timeseries_csv(), TIMESERIES_KEYS).unwrap();

    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].date, "2023-01-01");
    assert_eq!(aggregates[0].number_of_legs, 1450.0);
    assert_eq!(aggregates[1].km_flown, 1150000.5);
}

#[test]
fn test_typed_conversion_failure_names_the_row() {
    let text = "model,gph,source,date\nA,10,s,d\nB,lots,s,d";
    let err = deserialize_as::<RawAircraftModel>(text, MODEL_KEYS).unwrap_err();

    match err {
        Error::DataValidation { message } => assert!(message.starts_with("Row 2:")),
        other => panic!("expected DataValidation, got {:?}", other),
    }
}

#[test]
fn test_typed_conversion_of_quoted_numbers() {
    let text = "model,gph,source,date\n\"A\",\"10\",s,2024-01-01";
    let models = deserialize_as::<RawAircraftModel>(text, MODEL_KEYS).unwrap();

    assert_eq!(models[0].gph, 10.0);
}

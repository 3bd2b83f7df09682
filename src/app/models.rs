//! Data models for jetstats
//!
//! This module contains the scalar values produced by the delimited-text
//! parser, the generic records built by the deserializer, and the typed
//! domain records of each published dataset.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Parsed Scalars
// =============================================================================

/// A single parsed field
///
/// Unquoted fields are coerced opportunistically; quoted fields always stay
/// [`Value::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Empty unquoted field
    Null,
    /// Unquoted field made only of ASCII digits
    Int(i64),
    /// Unquoted field matching a plain decimal pattern
    Float(f64),
    /// Anything else, including every quoted field
    Text(String),
}

impl Value {
    /// Check whether this is an empty field
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a [`Value::Text`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a JSON value for typed deserialization
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Stringified form used for header comparison: null renders empty
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One parsed line of delimited text
pub type Row = Vec<Value>;

// =============================================================================
// Generic Records
// =============================================================================

/// A data row keyed by the dataset header
///
/// Keys are shared between all records of one deserialization call and keep
/// the header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    keys: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Build a record; `values` must have one entry per key
    pub(crate) fn new(keys: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    /// Look up a field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| self.values.get(i))
    }

    /// Field names in header order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Field values in header order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate over `(key, value)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys.iter().map(String::as_str).zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert into a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Aircraft Models
// =============================================================================

/// Where a fuel consumption figure was published
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub date: String,
}

/// One row of the model consumption database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAircraftModel {
    #[serde(deserialize_with = "de::string_like")]
    pub model: String,

    /// Fuel consumption in gallons per hour
    ///
    /// Kept with its fraction, never truncated to whole gallons.
    #[serde(deserialize_with = "de::number")]
    pub gph: f64,

    /// URL of the publication the figure comes from
    #[serde(deserialize_with = "de::string_like")]
    pub source: String,

    #[serde(deserialize_with = "de::string_like")]
    pub date: String,
}

impl RawAircraftModel {
    /// Provenance of this row
    pub fn provenance(&self) -> Source {
        Source {
            url: self.source.clone(),
            date: self.date.clone(),
        }
    }
}

/// Fuel consumption of an aircraft model averaged over all its sources
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftModel {
    pub model: String,

    /// Mean gallons per hour over every source row
    pub gph: f64,

    /// Contributing sources in the order they appear in the database
    pub sources: Vec<Source>,
}

// =============================================================================
// Aircraft Register
// =============================================================================

/// A registered private aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// 24-bit ICAO transponder address in hex
    #[serde(deserialize_with = "de::string_like")]
    pub icao_number: String,

    #[serde(deserialize_with = "de::string_like")]
    pub tail_number: String,

    /// ICAO type designator (e.g. "C56X")
    #[serde(deserialize_with = "de::string_like")]
    pub type_designator: String,

    #[serde(deserialize_with = "de::string_like")]
    pub model: String,

    /// Country of registration
    #[serde(deserialize_with = "de::string_like")]
    pub country: String,
}

// =============================================================================
// Aggregates
// =============================================================================

/// Activity totals for one date bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Start of the bucket, `YYYY-MM-DD`
    #[serde(deserialize_with = "de::string_like")]
    pub date: String,
    #[serde(deserialize_with = "de::metric")]
    pub number_of_aircrafts: f64,
    #[serde(deserialize_with = "de::metric")]
    pub number_of_legs: f64,
    /// Hours
    #[serde(deserialize_with = "de::metric")]
    pub time_flown: f64,
    /// kg of CO2
    #[serde(deserialize_with = "de::metric")]
    pub co2_emitted: f64,
    #[serde(deserialize_with = "de::metric")]
    pub km_flown: f64,
    #[serde(deserialize_with = "de::metric")]
    pub km_travelled: f64,
}

/// Activity totals for one date bucket and one country or model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAggregate {
    #[serde(deserialize_with = "de::string_like")]
    pub date: String,
    /// Country name or aircraft model, depending on the dataset
    #[serde(alias = "country", alias = "model", deserialize_with = "de::string_like")]
    pub key: String,
    #[serde(deserialize_with = "de::metric")]
    pub number_of_aircrafts: f64,
    #[serde(deserialize_with = "de::metric")]
    pub number_of_legs: f64,
    #[serde(deserialize_with = "de::metric")]
    pub time_flown: f64,
    #[serde(deserialize_with = "de::metric")]
    pub co2_emitted: f64,
    #[serde(deserialize_with = "de::metric")]
    pub km_flown: f64,
    #[serde(deserialize_with = "de::metric")]
    pub km_travelled: f64,
}

/// Common view over aggregate rows
pub trait Measured {
    /// Bucket start date as published
    fn date(&self) -> &str;

    /// Value of one metric
    fn quantity(&self, quantity: Quantity) -> f64;

    /// Calendar year of the bucket, if the date parses
    fn year(&self) -> Option<i32> {
        parse_bucket_date(self.date()).map(|d| d.year())
    }
}

impl Measured for Aggregate {
    fn date(&self) -> &str {
        &self.date
    }

    fn quantity(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::NumberOfAircrafts => self.number_of_aircrafts,
            Quantity::NumberOfLegs => self.number_of_legs,
            Quantity::TimeFlown => self.time_flown,
            Quantity::Co2Emitted => self.co2_emitted,
            Quantity::KmFlown => self.km_flown,
            Quantity::KmTravelled => self.km_travelled,
        }
    }
}

impl Measured for DimensionAggregate {
    fn date(&self) -> &str {
        &self.date
    }

    fn quantity(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::NumberOfAircrafts => self.number_of_aircrafts,
            Quantity::NumberOfLegs => self.number_of_legs,
            Quantity::TimeFlown => self.time_flown,
            Quantity::Co2Emitted => self.co2_emitted,
            Quantity::KmFlown => self.km_flown,
            Quantity::KmTravelled => self.km_travelled,
        }
    }
}

/// Parse the leading `YYYY-MM-DD` of a bucket date (timestamps are accepted)
pub fn parse_bucket_date(date: &str) -> Option<NaiveDate> {
    let head = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

// =============================================================================
// Positions
// =============================================================================

/// One recorded position of an aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Feet; absent on ground
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Position {
    /// Timestamp as UTC, accepting RFC 3339 or naive `YYYY-MM-DDTHH:MM:SS`
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

// =============================================================================
// Dataset Selectors
// =============================================================================

/// Time bucket size of the time-series dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    ByDay,
    ByMonth,
    ByYear,
}

impl Scale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::ByDay => "by_day",
            Scale::ByMonth => "by_month",
            Scale::ByYear => "by_year",
        }
    }

    /// Column title for the date axis
    pub fn title(&self) -> &'static str {
        match self {
            Scale::ByDay => "Days",
            Scale::ByMonth => "Months",
            Scale::ByYear => "Years",
        }
    }

    /// Shorten a bucket date to the scale's resolution
    ///
    /// `2023-01-01` renders as `2023` by year and `2023-01` by month.
    pub fn label_date<'a>(&self, date: &'a str) -> &'a str {
        let keep = match self {
            Scale::ByDay => return date,
            Scale::ByMonth => date.len().saturating_sub(3),
            Scale::ByYear => date.len().saturating_sub(6),
        };
        date.get(..keep).unwrap_or(date)
    }
}

impl FromStr for Scale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "by_day" | "day" => Ok(Scale::ByDay),
            "by_month" | "month" => Ok(Scale::ByMonth),
            "by_year" | "year" => Ok(Scale::ByYear),
            other => Err(Error::configuration(format!(
                "Unknown scale '{}' (expected by_day, by_month or by_year)",
                other
            ))),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric column of the aggregate datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    NumberOfAircrafts,
    NumberOfLegs,
    TimeFlown,
    Co2Emitted,
    KmFlown,
    KmTravelled,
}

impl Quantity {
    /// Quantities offered for charts and rankings
    pub const ALL: &'static [Quantity] = &[
        Quantity::TimeFlown,
        Quantity::Co2Emitted,
        Quantity::NumberOfAircrafts,
        Quantity::NumberOfLegs,
        Quantity::KmTravelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::NumberOfAircrafts => "number_of_aircrafts",
            Quantity::NumberOfLegs => "number_of_legs",
            Quantity::TimeFlown => "time_flown",
            Quantity::Co2Emitted => "co2_emitted",
            Quantity::KmFlown => "km_flown",
            Quantity::KmTravelled => "km_travelled",
        }
    }

    /// Human-readable label including the unit
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::NumberOfAircrafts => "Number of aircrafts",
            Quantity::NumberOfLegs => "Number of legs",
            Quantity::TimeFlown => "Time flown (hours)",
            Quantity::Co2Emitted => "Emissions (kg CO2)",
            Quantity::KmFlown => "Distance flown (km)",
            Quantity::KmTravelled => "Distance travelled (km)",
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "number_of_aircrafts" | "aircrafts" => Ok(Quantity::NumberOfAircrafts),
            "number_of_legs" | "legs" => Ok(Quantity::NumberOfLegs),
            "time_flown" | "time" => Ok(Quantity::TimeFlown),
            "co2_emitted" | "co2" | "emissions" => Ok(Quantity::Co2Emitted),
            "km_flown" => Ok(Quantity::KmFlown),
            "km_travelled" | "distance" => Ok(Quantity::KmTravelled),
            other => Err(Error::configuration(format!("Unknown quantity '{}'", other))),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping dimension of the per-dimension aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Country,
    Model,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Country => "country",
            Dimension::Model => "model",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Country => "Country",
            Dimension::Model => "Aircraft Model",
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "country" => Ok(Dimension::Country),
            "model" => Ok(Dimension::Model),
            other => Err(Error::configuration(format!(
                "Unknown dimension '{}' (expected country or model)",
                other
            ))),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket size of the per-dimension aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(Error::configuration(format!(
                "Unknown period '{}' (expected month or year)",
                other
            ))),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field Deserializers
// =============================================================================

/// Lenient field deserializers for values that went through type coercion
mod de {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    /// Accept text, or a number rendered back to text; null becomes empty
    pub fn string_like<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        struct StringLike;

        impl Visitor<'_> for StringLike {
            type Value = String;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
                Ok(v)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_unit<E: de::Error>(self) -> Result<String, E> {
                Ok(String::new())
            }

            fn visit_none<E: de::Error>(self) -> Result<String, E> {
                Ok(String::new())
            }
        }

        deserializer.deserialize_any(StringLike)
    }

    struct Number {
        null_as_zero: bool,
    }

    impl Visitor<'_> for Number {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            if self.null_as_zero {
                Ok(0.0)
            } else {
                Err(E::invalid_type(Unexpected::Unit, &self))
            }
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            self.visit_unit()
        }
    }

    /// Required number; numeric strings are parsed, null is rejected
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(Number {
            null_as_zero: false,
        })
    }

    /// Aggregate metric; an empty cell is a sum over nothing and reads as zero
    pub fn metric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(Number { null_as_zero: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display_matches_header_stringification() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Text("model".to_string()).to_string(), "model");
    }

    #[test]
    fn test_record_serializes_in_header_order() {
        let keys: Arc<[String]> = vec!["b".to_string(), "a".to_string()].into();
        let record = Record::new(keys, vec![Value::Int(1), Value::Text("x".to_string())]);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"b":1,"a":"x"}"#);
        assert_eq!(record.get("a"), Some(&Value::Text("x".to_string())));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_raw_model_accepts_numeric_strings() {
        let json = serde_json::json!({
            "model": "A", "gph": "10", "source": "https://example.org", "date": "2024-01-01"
        });
        let raw: RawAircraftModel = serde_json::from_value(json).unwrap();
        assert_eq!(raw.gph, 10.0);
    }

    #[test]
    fn test_raw_model_keeps_fractional_gph() {
        let json = serde_json::json!({
            "model": "A", "gph": "180.5", "source": "s", "date": "d"
        });
        let raw: RawAircraftModel = serde_json::from_value(json).unwrap();
        assert_eq!(raw.gph, 180.5);
    }

    #[test]
    fn test_raw_model_rejects_missing_gph() {
        let json = serde_json::json!({
            "model": "A", "gph": null, "source": "s", "date": "d"
        });
        assert!(serde_json::from_value::<RawAircraftModel>(json).is_err());
    }

    #[test]
    fn test_aircraft_numeric_icao_kept_as_text() {
        let json = serde_json::json!({
            "icao_number": 400123, "tail_number": "G-ABCD", "type_designator": "C56X",
            "model": "Citation Excel", "country": null
        });
        let aircraft: Aircraft = serde_json::from_value(json).unwrap();
        assert_eq!(aircraft.icao_number, "400123");
        assert_eq!(aircraft.country, "");
    }

    #[test]
    fn test_scale_label_date() {
        assert_eq!(Scale::ByYear.label_date("2023-01-01"), "2023");
        assert_eq!(Scale::ByMonth.label_date("2023-04-01"), "2023-04");
        assert_eq!(Scale::ByDay.label_date("2023-04-17"), "2023-04-17");
        assert_eq!(Scale::ByYear.label_date("23"), "");
    }

    #[test]
    fn test_selectors_from_str() {
        assert_eq!("by_month".parse::<Scale>().unwrap(), Scale::ByMonth);
        assert_eq!("CO2_EMITTED".parse::<Quantity>().unwrap(), Quantity::Co2Emitted);
        assert_eq!("country".parse::<Dimension>().unwrap(), Dimension::Country);
        assert_eq!("year".parse::<Period>().unwrap(), Period::Year);
        assert!("weekly".parse::<Scale>().is_err());
    }

    #[test]
    fn test_selectors_display_round_trip() {
        for period in [Period::Month, Period::Year] {
            assert_eq!(period.to_string().parse::<Period>().unwrap(), period);
        }
        for dimension in [Dimension::Country, Dimension::Model] {
            assert_eq!(dimension.to_string().parse::<Dimension>().unwrap(), dimension);
        }
        assert_eq!(
            format!("{} by {}", Dimension::Country, Period::Month),
            "country by month"
        );
    }

    #[test]
    fn test_measured_year() {
        let row = Aggregate {
            date: "2023-06-01".to_string(),
            number_of_aircrafts: 1.0,
            number_of_legs: 2.0,
            time_flown: 3.0,
            co2_emitted: 4.0,
            km_flown: 5.0,
            km_travelled: 6.0,
        };
        assert_eq!(row.year(), Some(2023));
        assert_eq!(row.quantity(Quantity::Co2Emitted), 4.0);
    }

    #[test]
    fn test_position_timestamp_parsing() {
        let position = Position {
            timestamp: "2024-07-01T12:30:00".to_string(),
            latitude: 51.47,
            longitude: -0.45,
            altitude: None,
        };
        assert!(position.parsed_timestamp().is_some());
    }
}

//! Dataset catalog: loaders and fetchers for every published file
//!
//! Loaders turn raw text into typed records and never touch the network.
//! Fetchers resolve a dataset path against a [`DataSource`] and hand the
//! text to the matching loader.
//!
//! Failure policy per source:
//! - CSV datasets fail loudly: transport errors and non-2xx statuses are
//!   returned to the caller.
//! - Positions fail softly on a non-2xx status (empty list) but still
//!   return transport errors.

use tracing::{info, warn};

use crate::app::adapters::DataSource;
use crate::app::models::{
    Aggregate, Aircraft, AircraftModel, Dimension, DimensionAggregate, Period, Position,
    RawAircraftModel, Scale,
};
use crate::app::services::aggregator::aggregate_aircraft_models;
use crate::app::services::record_deserializer::RecordDeserializer;
use crate::constants::{
    AIRCRAFT_KEYS, MODEL_DB_PATH, MODEL_KEYS, TIMESERIES_KEYS, aircraft_path, dimension_keys,
    dimension_path, positions_path, timeseries_path,
};
use crate::{Error, Result};

// =============================================================================
// Loaders
// =============================================================================

/// Raw rows of the model consumption database
pub fn load_raw_aircraft_models(
    deserializer: &RecordDeserializer,
    content: &str,
) -> Result<Vec<RawAircraftModel>> {
    deserializer.deserialize_as(content, MODEL_KEYS)
}

/// Model consumption database averaged per model
pub fn load_aircraft_models(
    deserializer: &RecordDeserializer,
    content: &str,
) -> Result<Vec<AircraftModel>> {
    let raw = load_raw_aircraft_models(deserializer, content)?;
    let rows = raw.len();
    let models = aggregate_aircraft_models(raw);
    info!("Loaded {} aircraft models from {} rows", models.len(), rows);
    Ok(models)
}

/// Private aircraft register
pub fn load_aircrafts(deserializer: &RecordDeserializer, content: &str) -> Result<Vec<Aircraft>> {
    deserializer.deserialize_as(content, AIRCRAFT_KEYS)
}

/// Time-series aggregates
pub fn load_aggregates(deserializer: &RecordDeserializer, content: &str) -> Result<Vec<Aggregate>> {
    deserializer.deserialize_as(content, TIMESERIES_KEYS)
}

/// Per-country or per-model aggregates
pub fn load_dimension_aggregates(
    deserializer: &RecordDeserializer,
    content: &str,
    dimension: Dimension,
) -> Result<Vec<DimensionAggregate>> {
    let keys = dimension_keys(dimension.as_str());
    deserializer.deserialize_as(content, &keys)
}

/// Positions JSON array
pub fn load_positions(content: &str) -> Result<Vec<Position>> {
    serde_json::from_str(content).map_err(|e| Error::json("Failed to decode positions", e))
}

// =============================================================================
// Fetchers
// =============================================================================

/// Fetch and aggregate the model consumption database
pub async fn fetch_aircraft_models(
    source: &DataSource,
    deserializer: &RecordDeserializer,
) -> Result<Vec<AircraftModel>> {
    let content = source.fetch_text(MODEL_DB_PATH).await?;
    load_aircraft_models(deserializer, &content)
}

/// Fetch the private aircraft register of `month` (`YYYY-MM`)
pub async fn fetch_aircrafts(
    source: &DataSource,
    deserializer: &RecordDeserializer,
    month: &str,
) -> Result<Vec<Aircraft>> {
    let content = source.fetch_text(&aircraft_path(month)).await?;
    load_aircrafts(deserializer, &content)
}

/// Fetch the time-series aggregates at `scale`
pub async fn fetch_aggregates(
    source: &DataSource,
    deserializer: &RecordDeserializer,
    scale: Scale,
) -> Result<Vec<Aggregate>> {
    let content = source.fetch_text(&timeseries_path(scale.as_str())).await?;
    load_aggregates(deserializer, &content)
}

/// Fetch per-dimension aggregates for `period`
pub async fn fetch_dimension_aggregates(
    source: &DataSource,
    deserializer: &RecordDeserializer,
    dimension: Dimension,
    period: Period,
) -> Result<Vec<DimensionAggregate>> {
    let path = dimension_path(dimension.as_str(), period.as_str());
    let content = source.fetch_text(&path).await?;
    load_dimension_aggregates(deserializer, &content, dimension)
}

/// Fetch the positions of one aircraft in `month`; missing data is empty
pub async fn fetch_positions(
    source: &DataSource,
    icao_number: &str,
    month: &str,
) -> Result<Vec<Position>> {
    let path = positions_path(icao_number, month);
    match source.fetch_optional_text(&path).await? {
        Some(content) => load_positions(&content),
        None => {
            warn!("No positions at {}", source.describe(&path));
            Ok(Vec::new())
        }
    }
}

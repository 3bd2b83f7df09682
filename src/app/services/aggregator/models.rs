//! Aircraft model fuel consumption aggregation

use tracing::debug;

use super::grouped_mean::aggregate_by;
use crate::app::models::{AircraftModel, RawAircraftModel};

/// Average the fuel consumption of each model over all its source rows
///
/// Models keep the order in which they first appear; each model's sources
/// keep database order.
pub fn aggregate_aircraft_models(
    raw: impl IntoIterator<Item = RawAircraftModel>,
) -> Vec<AircraftModel> {
    let models: Vec<AircraftModel> = aggregate_by(
        raw,
        |row| row.model.clone(),
        |row| row.gph,
        RawAircraftModel::provenance,
    )
    .into_iter()
    .map(|entry| AircraftModel {
        model: entry.key,
        gph: entry.mean,
        sources: entry.provenance,
    })
    .collect();

    debug!("Aggregated {} aircraft models", models.len());
    models
}

//! Tests for per-key aggregation

use crate::app::models::RawAircraftModel;


/// Raw model row with a synthetic source URL
pub fn raw_model(model: &str, gph: f64, date: &str) -> RawAircraftModel {
    RawAircraftModel {
        model: model.to_string(),
        gph,
        source: format!("https://example.org/{}/{}", model, date),
        date: date.to_string(),
    }
}

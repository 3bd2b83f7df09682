//! `aircraft` command: the private aircraft register of one month

use tracing::info;

use crate::Result;
use crate::app::models::Aircraft;
use crate::app::services::datasets::fetch_aircrafts;
use crate::cli::args::{AircraftArgs, GlobalArgs};
use crate::cli::commands::shared::{load_configuration, resolve_month, with_spinner};
use crate::cli::output::{Table, emit};

pub async fn run_aircraft(args: AircraftArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let month = resolve_month(args.month.as_deref(), &config)?;
    let source = config.data_source()?;
    let deserializer = config.deserializer();

    let aircrafts = with_spinner(
        &format!("Fetching private aircraft register for {}", month),
        global.show_progress(),
        fetch_aircrafts(&source, &deserializer, &month),
    )
    .await?;
    let total = aircrafts.len();

    let aircrafts = filter_aircrafts(aircrafts, &args);
    info!("Showing {} of {} aircraft for {}", aircrafts.len(), total, month);

    emit(global.output_format, &aircraft_table(&aircrafts), &aircrafts)
}

fn filter_aircrafts(aircrafts: Vec<Aircraft>, args: &AircraftArgs) -> Vec<Aircraft> {
    let limit = args.limit.unwrap_or(usize::MAX);
    aircrafts
        .into_iter()
        .filter(|a| {
            args.country
                .as_deref()
                .is_none_or(|country| a.country.eq_ignore_ascii_case(country))
        })
        .filter(|a| {
            args.model
                .as_deref()
                .is_none_or(|model| a.model.eq_ignore_ascii_case(model))
        })
        .take(limit)
        .collect()
}

fn aircraft_table(aircrafts: &[Aircraft]) -> Table {
    let mut table = Table::new(["ICAO", "Tail number", "Type", "Model", "Country"]);
    for aircraft in aircrafts {
        table.push_row(vec![
            aircraft.icao_number.clone(),
            aircraft.tail_number.clone(),
            aircraft.type_designator.clone(),
            aircraft.model.clone(),
            aircraft.country.clone(),
        ]);
    }
    table
}

//! `positions` command: flight positions of one aircraft in a month

use chrono::{DateTime, Utc};
use tracing::info;

use crate::Result;
use crate::app::models::Position;
use crate::app::services::datasets::fetch_positions;
use crate::cli::args::{GlobalArgs, PositionsArgs};
use crate::cli::commands::shared::{load_configuration, resolve_month, with_spinner};
use crate::cli::output::{Table, emit};

pub async fn run_positions(args: PositionsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let month = resolve_month(args.month.as_deref(), &config)?;
    let source = config.data_source()?;
    let icao_number = args.icao_number.trim().to_lowercase();

    let positions = with_spinner(
        &format!("Fetching positions of {} for {}", icao_number, month),
        global.show_progress(),
        fetch_positions(&source, &icao_number, &month),
    )
    .await?;
    info!("{} positions for {} in {}", positions.len(), icao_number, month);
    if let Some((first, last)) = time_span(&positions) {
        info!("Recorded between {} and {}", first, last);
    }

    emit(global.output_format, &positions_table(&positions), &positions)
}

/// Earliest and latest parsable timestamp
fn time_span(positions: &[Position]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    positions
        .iter()
        .filter_map(Position::parsed_timestamp)
        .fold(None, |span, at| match span {
            None => Some((at, at)),
            Some((first, last)) => Some((first.min(at), last.max(at))),
        })
}

fn positions_table(positions: &[Position]) -> Table {
    let mut table = Table::new(["Timestamp", "Latitude", "Longitude", "Altitude"]);
    for position in positions {
        table.push_row(vec![
            position.timestamp.clone(),
            format!("{:.4}", position.latitude),
            format!("{:.4}", position.longitude),
            position
                .altitude
                .map(|altitude| format!("{:.0}", altitude))
                .unwrap_or_default(),
        ]);
    }
    table
}

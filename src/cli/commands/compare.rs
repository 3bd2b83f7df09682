//! `compare` command: rank countries or models by one quantity

use serde::Serialize;
use tracing::{info, warn};

use crate::Result;
use crate::app::models::{Dimension, DimensionAggregate, Measured, Quantity};
use crate::app::services::aggregator::merge_by_key;
use crate::app::services::datasets::fetch_dimension_aggregates;
use crate::app::services::reshape::{
    atlas_country_name, available_years, filter_year, latest_year, rank_by_quantity,
};
use crate::app::services::unit_formatter::UnitFormatter;
use crate::cli::args::{CompareArgs, GlobalArgs};
use crate::cli::commands::shared::{load_configuration, with_spinner};
use crate::cli::commands::timeline::render_amount;
use crate::cli::output::{Table, emit};

/// One ranked entry as printed
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Ranked {
    rank: usize,
    key: String,
    value: f64,
}

pub async fn run_compare(args: CompareArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let source = config.data_source()?;
    let deserializer = config.deserializer();

    let rows = with_spinner(
        &format!("Fetching {} aggregates by {}", args.dimension, args.period),
        global.show_progress(),
        fetch_dimension_aggregates(&source, &deserializer, args.dimension, args.period),
    )
    .await?;

    let Some(year) = args.year.or_else(|| latest_year(&rows)) else {
        warn!("No dated rows in the {} dataset", args.dimension);
        return emit(global.output_format, &Table::default(), &Vec::<Ranked>::new());
    };

    let current = filter_year(&rows, year);
    if current.is_empty() {
        warn!(
            "No {} rows in {}; available years: {:?}",
            args.dimension,
            year,
            available_years(&rows)
        );
    }

    let limit = args.limit.unwrap_or(config.rank_limit);
    let ranked = rank(
        current,
        args.dimension,
        args.quantity,
        limit,
        args.atlas_names,
    );
    info!(
        "Top {} by {} in {} ({} candidates)",
        ranked.len(),
        args.quantity,
        year,
        rows.len()
    );

    let formatter = (!args.raw).then(|| config.formatter());
    let table = ranking_table(&ranked, args.dimension, args.quantity, formatter.as_ref())?;
    emit(global.output_format, &table, &ranked)
}

/// Sum a year's buckets per key, then rank
fn rank(
    rows: Vec<DimensionAggregate>,
    dimension: Dimension,
    quantity: Quantity,
    limit: usize,
    atlas_names: bool,
) -> Vec<Ranked> {
    let totals = rank_by_quantity(sum_by_key(rows), quantity, limit);
    totals
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let key = if atlas_names && dimension == Dimension::Country {
                atlas_country_name(&row.key).to_string()
            } else {
                row.key.clone()
            };
            Ranked {
                rank: i + 1,
                value: row.quantity(quantity),
                key,
            }
        })
        .collect()
}

/// Monthly files hold one row per key and month; fold them into one per key
fn sum_by_key(rows: Vec<DimensionAggregate>) -> Vec<DimensionAggregate> {
    merge_by_key(
        rows,
        |row| row.key.clone(),
        |total, row| {
            total.number_of_aircrafts += row.number_of_aircrafts;
            total.number_of_legs += row.number_of_legs;
            total.time_flown += row.time_flown;
            total.co2_emitted += row.co2_emitted;
            total.km_flown += row.km_flown;
            total.km_travelled += row.km_travelled;
        },
    )
}

fn ranking_table(
    ranked: &[Ranked],
    dimension: Dimension,
    quantity: Quantity,
    formatter: Option<&UnitFormatter>,
) -> Result<Table> {
    let mut table = Table::new(["#", dimension.title(), quantity.label()]);
    for entry in ranked {
        table.push_row(vec![
            entry.rank.to_string(),
            entry.key.clone(),
            render_amount(entry.value, formatter)?,
        ]);
    }
    Ok(table)
}

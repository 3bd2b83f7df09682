//! `timeline` command: activity totals per day, month or year

use tracing::{info, warn};

use crate::Result;
use crate::app::models::{Aggregate, Measured, Quantity, Scale};
use crate::app::services::datasets::fetch_aggregates;
use crate::app::services::reshape::{available_years, filter_year};
use crate::app::services::unit_formatter::UnitFormatter;
use crate::cli::args::{GlobalArgs, TimelineArgs};
use crate::cli::commands::shared::{load_configuration, with_spinner};
use crate::cli::output::{Table, emit};

pub async fn run_timeline(args: TimelineArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let source = config.data_source()?;
    let deserializer = config.deserializer();

    let aggregates = with_spinner(
        &format!("Fetching {} time series", args.scale),
        global.show_progress(),
        fetch_aggregates(&source, &deserializer, args.scale),
    )
    .await?;

    let aggregates = match args.year {
        Some(year) => {
            let selected = filter_year(&aggregates, year);
            if selected.is_empty() {
                warn!(
                    "No {} buckets in {}; available years: {:?}",
                    args.scale,
                    year,
                    available_years(&aggregates)
                );
            }
            selected
        }
        None => aggregates,
    };
    info!("Showing {} {} buckets", aggregates.len(), args.scale);

    let quantities = if args.quantities.is_empty() {
        Quantity::ALL.to_vec()
    } else {
        args.quantities.clone()
    };
    let formatter = (!args.raw).then(|| config.formatter());
    let table = timeline_table(&aggregates, args.scale, &quantities, formatter.as_ref())?;

    emit(global.output_format, &table, &aggregates)
}

fn timeline_table(
    aggregates: &[Aggregate],
    scale: Scale,
    quantities: &[Quantity],
    formatter: Option<&UnitFormatter>,
) -> Result<Table> {
    let headers = std::iter::once(scale.title()).chain(quantities.iter().map(Quantity::label));
    let mut table = Table::new(headers);

    for aggregate in aggregates {
        let mut row = vec![scale.label_date(aggregate.date()).to_string()];
        for quantity in quantities {
            row.push(render_amount(aggregate.quantity(*quantity), formatter)?);
        }
        table.push_row(row);
    }
    Ok(table)
}

/// Prefixed amount, or the plain number when no formatter is given
pub(crate) fn render_amount(amount: f64, formatter: Option<&UnitFormatter>) -> Result<String> {
    match formatter {
        Some(formatter) => Ok(formatter.format(amount)?.trim_end().to_string()),
        None => Ok(amount.to_string()),
    }
}

//! `models` command: fuel consumption per aircraft model

use tracing::info;

use crate::Result;
use crate::app::models::AircraftModel;
use crate::app::services::datasets::fetch_aircraft_models;
use crate::cli::args::{GlobalArgs, ModelsArgs};
use crate::cli::commands::shared::{load_configuration, with_spinner};
use crate::cli::output::{Table, emit};

pub async fn run_models(args: ModelsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let source = config.data_source()?;
    let deserializer = config.deserializer();

    let models = with_spinner(
        "Fetching aircraft model database",
        global.show_progress(),
        fetch_aircraft_models(&source, &deserializer),
    )
    .await?;

    let models = select_models(models, &args);
    info!("Showing {} aircraft models", models.len());

    emit(global.output_format, &models_table(&models, args.show_sources), &models)
}

fn select_models(models: Vec<AircraftModel>, args: &ModelsArgs) -> Vec<AircraftModel> {
    let mut models: Vec<AircraftModel> = match &args.search {
        Some(search) => {
            let needle = search.to_lowercase();
            models
                .into_iter()
                .filter(|m| m.model.to_lowercase().contains(&needle))
                .collect()
        }
        None => models,
    };

    if args.by_gph {
        models.sort_by(|a, b| b.gph.total_cmp(&a.gph));
    }
    if let Some(limit) = args.limit {
        models.truncate(limit);
    }
    models
}

fn models_table(models: &[AircraftModel], show_sources: bool) -> Table {
    let mut table = Table::new(["Model", "Gallons per hour", "Sources"]);
    for model in models {
        let sources = if show_sources {
            model
                .sources
                .iter()
                .map(|s| format!("{} ({})", s.url, s.date))
                .collect::<Vec<_>>()
                .join("; ")
        } else {
            model.sources.len().to_string()
        };
        table.push_row(vec![model.model.clone(), format!("{:.1}", model.gph), sources]);
    }
    table
}

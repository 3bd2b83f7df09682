//! Command implementations for the jetstats CLI
//!
//! Each subcommand is implemented in its own module. They all load the
//! layered configuration, fetch what they need through a
//! [`DataSource`](crate::app::adapters::DataSource) and print through
//! [`output`](crate::cli::output).

pub mod aircraft;
pub mod compare;
pub mod format;
pub mod models;
pub mod parse;
pub mod positions;
pub mod shared;
pub mod timeline;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Sets up logging once, then dispatches to the subcommand handler.
pub async fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args.global)?;

    let command = args
        .command
        .ok_or_else(|| Error::configuration("No command given"))?;
    let global = args.global;

    match command {
        Commands::Parse(parse_args) => parse::run_parse(parse_args, &global).await,
        Commands::Models(models_args) => models::run_models(models_args, &global).await,
        Commands::Aircraft(aircraft_args) => aircraft::run_aircraft(aircraft_args, &global).await,
        Commands::Timeline(timeline_args) => timeline::run_timeline(timeline_args, &global).await,
        Commands::Compare(compare_args) => compare::run_compare(compare_args, &global).await,
        Commands::Positions(positions_args) => {
            positions::run_positions(positions_args, &global).await
        }
        Commands::Format(format_args) => format::run_format(format_args, &global),
    }
}

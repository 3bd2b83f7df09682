use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use jetstats::cli::{args::Args, commands};
use std::process;

/// Exit status for errors in the configuration or arguments
const EXIT_USAGE: i32 = 2;
/// Conventional exit status after SIGINT
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<()> = runtime.block_on(async {
        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("Failed to install CTRL+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result.context("Command failed"),
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(jetstats::Error::processing_interrupted("Interrupted by user").into())
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
            process::exit(exit_code(&error));
        }
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<jetstats::Error>() {
        Some(jetstats::Error::ProcessingInterrupted { .. }) => EXIT_INTERRUPTED,
        Some(jetstats::Error::Configuration { .. } | jetstats::Error::MalformedDialect { .. }) => {
            EXIT_USAGE
        }
        _ => 1,
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("jetstats - private aviation statistics");
    println!("======================================");
    println!();
    println!("Load the published private jet datasets and print them as tables,");
    println!("JSON or CSV.");
    println!();
    println!("USAGE:");
    println!("    jetstats [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse a delimited text file with a custom dialect");
    println!("    models      Fuel consumption per aircraft model");
    println!("    aircraft    Private aircraft register for a month");
    println!("    timeline    Activity totals by day, month or year");
    println!("    compare     Rank countries or models by one quantity");
    println!("    positions   Flight positions of one aircraft");
    println!("    format      Scale amounts into prefixed strings");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>      Configuration file (JSON)");
    println!("        --base-url <URL>     Object store root");
    println!("        --source-dir <PATH>  Read datasets from a local mirror");
    println!("    -f, --format <FORMAT>    table, json or csv");
    println!("    -h, --help               Show help information");
    println!("    -V, --version            Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Top 10 emitting countries in the latest year:");
    println!("    jetstats compare --dimension country --limit 10");
    println!();
    println!("    # Monthly legs flown in 2023, as CSV:");
    println!("    jetstats timeline --scale by_month --year 2023 --quantity legs -f csv");
    println!();
    println!("    # Parse a semicolon-separated file without trimming:");
    println!("    jetstats parse data.csv --delimiter ';' --no-trim");
    println!();
    println!("For detailed help on any command, use:");
    println!("    jetstats <COMMAND> --help");
}

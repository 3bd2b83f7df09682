//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and the fetch spinner used
//! by every subcommand.

use crate::app::services::unit_formatter::PrefixStyle;
use crate::cli::args::GlobalArgs;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &GlobalArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jetstats={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &GlobalArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, checking the default location"),
    }

    let mut config = Config::load(args.config_file.as_deref())?;
    config = apply_cli_overrides(config, args);

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(mut config: Config, args: &GlobalArgs) -> Config {
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(source_dir) = &args.source_dir {
        config = config.with_source_dir(source_dir.clone());
    }
    if args.strict {
        config = config.with_strict_rows();
    }
    if let Some(unit_base) = args.unit_base {
        config = config.with_unit_base(unit_base);
    }
    if args.iec {
        config = config.with_prefix_style(PrefixStyle::Iec);
    }
    config
}

/// Create a spinner with appropriate styling; hidden in quiet mode
pub fn create_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Await `task` while a spinner shows `message`
pub async fn with_spinner<T, F>(message: &str, visible: bool, task: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let spinner = create_spinner(message, visible);
    let result = task.await;
    spinner.finish_and_clear();
    result
}

/// Resolve an optional `YYYY-MM` argument against the configured month
pub fn resolve_month(month: Option<&str>, config: &Config) -> Result<String> {
    match month {
        Some(month) => {
            let candidate = config.clone().with_aircraft_month(month);
            candidate.validate()?;
            Ok(candidate.aircraft_month)
        }
        None => Ok(config.aircraft_month.clone()),
    }
}

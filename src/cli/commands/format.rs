//! `format` command: scale amounts with the unit formatter

use serde::Serialize;

use crate::Result;
use crate::app::services::unit_formatter::UnitFormatter;
use crate::cli::args::{FormatArgs, GlobalArgs};
use crate::cli::commands::shared::load_configuration;
use crate::cli::output::{Table, emit};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Formatted {
    amount: f64,
    formatted: String,
}

pub fn run_format(args: FormatArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;
    let formatted = format_amounts(&config.formatter(), &args.amounts, &args.unit)?;

    let mut table = Table::new(["Amount", "Formatted"]);
    for entry in &formatted {
        table.push_row(vec![entry.amount.to_string(), entry.formatted.clone()]);
    }
    emit(global.output_format, &table, &formatted)
}

fn format_amounts(
    formatter: &UnitFormatter,
    amounts: &[f64],
    unit: &str,
) -> Result<Vec<Formatted>> {
    amounts
        .iter()
        .map(|&amount| {
            Ok(Formatted {
                amount,
                formatted: format!("{}{}", formatter.format(amount)?, unit),
            })
        })
        .collect()
}

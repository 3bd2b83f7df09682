//! `parse` command: run the delimited-text parser over a file or stdin

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::app::models::{Record, Row};
use crate::app::services::delimited_parser::{DialectOptions, parse};
use crate::cli::args::{GlobalArgs, ParseArgs};
use crate::cli::commands::shared::load_configuration;
use crate::cli::output::{Table, emit};
use crate::{Error, Result};

/// Parse the input and print raw rows, or records when `--keys` is given
pub async fn run_parse(args: ParseArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_configuration(global)?;

    let pairs = args.dialect_pairs()?;
    let options = DialectOptions::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let text = read_input(args.input.as_deref()).await?;

    if args.keys.is_empty() {
        let rows = parse(&text, Some(&options))?;
        info!("Parsed {} rows", rows.len());
        emit(global.output_format, &rows_table(&rows), &rows)
    } else {
        if options != DialectOptions::default() {
            warn!("Dialect flags are ignored when validating records against --keys");
        }
        let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
        let records = config.deserializer().deserialize(&text, &keys)?;
        info!("Deserialized {} records", records.len());
        emit(global.output_format, &records_table(&keys, &records), &records)
    }
}

async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e)),
        _ => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(|e| Error::io("Failed to read standard input", e))?;
            Ok(text)
        }
    }
}

/// Positional columns named `1..=n`
fn rows_table(rows: &[Row]) -> Table {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut table = Table::new((1..=width).map(|i| i.to_string()));
    for row in rows {
        table.push_row(row.iter().map(ToString::to_string).collect());
    }
    table
}

fn records_table(keys: &[&str], records: &[Record]) -> Table {
    let mut table = Table::new(keys.iter().copied());
    for record in records {
        table.push_row(record.values().iter().map(ToString::to_string).collect());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::record_deserializer::deserialize;
    use tempfile::TempDir;

    #[test]
    fn test_rows_table_uses_widest_row() {
        let rows = parse("a,b,c\n1\n", None).unwrap();
        let table = rows_table(&rows);

        assert_eq!(table.headers(), &["1", "2", "3"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_records_table() {
        let records = deserialize("a,b\n1,x\n", &["a", "b"]).unwrap();
        let table = records_table(&["a", "b"], &records);

        assert_eq!(table.to_csv().unwrap(), "a,b\n1,x\n");
    }

    #[tokio::test]
    async fn test_read_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b\n").unwrap();

        assert_eq!(read_input(Some(&path)).await.unwrap(), "a,b\n");
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_input(Some(&dir.path().join("missing.csv"))).await;
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}

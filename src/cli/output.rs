//! Rendering of command results
//!
//! Every command builds a [`Table`] for the table and CSV formats and hands
//! a serializable value for the JSON format. Results go to stdout; logs and
//! spinners stay on stderr.

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::{Error, Result};

/// Column-aligned text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; short rows are padded with empty cells
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.width()];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    /// Render with bold headers and two spaces between columns
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        let header_line = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = self.headers.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = *width)
                    .bold()
                    .cyan()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(header_line.trim_end());
        out.push('\n');

        for row in &self.rows {
            let line = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = *width)
                })
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }

    /// Render as CSV with a header row
    ///
    /// # Errors
    /// * Returns `Error::CsvWriting` if a record cannot be written
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer
            .write_record(&self.headers)
            .map_err(|e| Error::csv_writing("Failed to write CSV header", e))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| Error::csv_writing("Failed to write CSV row", e))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::io("Failed to flush CSV output", e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::data_validation(format!("CSV output is not UTF-8: {}", e)))
    }
}

/// Pretty-printed JSON
///
/// # Errors
/// * Returns `Error::Json` if the value cannot be serialized
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::json("Failed to serialize output", e))
}

/// Render a result in the requested format
pub fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    table: &Table,
    data: &T,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table.render()),
        OutputFormat::Csv => table.to_csv(),
        OutputFormat::Json => to_json(data).map(|mut json| {
            json.push('\n');
            json
        }),
    }
}

/// Print a result to stdout in the requested format
pub fn emit<T: Serialize + ?Sized>(format: OutputFormat, table: &Table, data: &T) -> Result<()> {
    let output = render(format, table, data)?;
    print!("{}", output);
    Ok(())
}

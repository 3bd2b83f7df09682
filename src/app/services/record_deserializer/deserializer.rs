//! Header validation, positional zipping and typed conversion

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::app::models::{Record, Row, Value};
use crate::app::services::delimited_parser::parse;
use crate::{Error, Result};

/// Policy for data rows whose length differs from the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowMode {
    /// Pad short rows with nulls, drop surplus fields of long rows
    #[default]
    Lenient,
    /// Reject any row whose length differs from the header
    Strict,
}

/// Deserializer bound to a row-length policy
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordDeserializer {
    mode: RowMode,
}

impl RecordDeserializer {
    pub fn new(mode: RowMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    /// Parse `text` and build one record per data row
    ///
    /// # Arguments
    /// * `text` - Raw CSV content, header first
    /// * `expected_keys` - Header the dataset must carry, in order
    ///
    /// # Errors
    /// * Returns `Error::SchemaMismatch` if the header differs from `expected_keys`
    /// * Returns `Error::RowLengthMismatch` for a short or long row in strict mode
    pub fn deserialize(&self, text: &str, expected_keys: &[&str]) -> Result<Vec<Record>> {
        let mut rows = parse(text, None)?.into_iter();

        // The parser always yields at least one row
        let header = rows.next().unwrap_or_default();
        check_header(&header, expected_keys)?;

        let keys: Arc<[String]> = expected_keys.iter().map(|k| k.to_string()).collect();
        let records = rows
            .enumerate()
            .map(|(index, row)| self.zip_row(&keys, row, index + 1))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Deserialized {} records with keys [{}]",
            records.len(),
            expected_keys.join(",")
        );

        Ok(records)
    }

    /// Deserialize and convert every record into `T` through serde
    ///
    /// # Errors
    /// * Everything [`deserialize`](Self::deserialize) returns
    /// * Returns `Error::DataValidation` naming the 1-based data row that
    ///   failed to convert
    pub fn deserialize_as<T: DeserializeOwned>(
        &self,
        text: &str,
        expected_keys: &[&str],
    ) -> Result<Vec<T>> {
        self.deserialize(text, expected_keys)?
            .iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record.to_json()).map_err(|e| {
                    Error::data_validation(format!("Row {}: {}", index + 1, e))
                })
            })
            .collect()
    }

    fn zip_row(&self, keys: &Arc<[String]>, mut row: Row, row_number: usize) -> Result<Record> {
        if row.len() != keys.len() {
            match self.mode {
                RowMode::Strict => {
                    return Err(Error::row_length_mismatch(row_number, keys.len(), row.len()));
                }
                RowMode::Lenient => {
                    debug!(
                        "Row {} has {} fields for {} keys; zipping positionally",
                        row_number,
                        row.len(),
                        keys.len()
                    );
                    row.resize(keys.len(), Value::Null);
                }
            }
        }
        Ok(Record::new(Arc::clone(keys), row))
    }
}

/// Compare the stringified header with the expected keys, element-wise
fn check_header(header: &Row, expected_keys: &[&str]) -> Result<()> {
    let found: Vec<String> = header.iter().map(Value::to_string).collect();
    let matches = found.len() == expected_keys.len()
        && found.iter().zip(expected_keys).all(|(f, e)| f == e);

    if matches {
        Ok(())
    } else {
        Err(Error::schema_mismatch(expected_keys, found))
    }
}

/// Deserialize with the default (lenient) row policy
pub fn deserialize(text: &str, expected_keys: &[&str]) -> Result<Vec<Record>> {
    RecordDeserializer::default().deserialize(text, expected_keys)
}

/// Deserialize into typed records with the default (lenient) row policy
pub fn deserialize_as<T: DeserializeOwned>(text: &str, expected_keys: &[&str]) -> Result<Vec<T>> {
    RecordDeserializer::default().deserialize_as(text, expected_keys)
}

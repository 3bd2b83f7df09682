//! Record deserializer for header-first CSV datasets
//!
//! Parses text with the default dialect, checks the header row against the
//! dataset's expected keys, and zips every later row into a [`Record`]. A
//! header mismatch is a recoverable [`Error::SchemaMismatch`] and produces no
//! records.
//!
//! Rows whose length differs from the header are handled according to
//! [`RowMode`]: padded/truncated in lenient mode, rejected in strict mode.
//!
//! [`Record`]: crate::app::models::Record
//! [`Error::SchemaMismatch`]: crate::Error::SchemaMismatch

pub mod deserializer;

#[cfg(test)]
pub mod tests;

pub use deserializer::{RecordDeserializer, RowMode, deserialize, deserialize_as};

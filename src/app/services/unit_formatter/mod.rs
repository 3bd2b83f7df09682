//! Human-readable magnitudes with SI or IEC prefixes
//!
//! - [`formatter`] - Base/style selection, scaling and rendering

pub mod formatter;

#[cfg(test)]
pub mod tests;

pub use formatter::{PrefixStyle, Scaled, UnitBase, UnitFormatter};

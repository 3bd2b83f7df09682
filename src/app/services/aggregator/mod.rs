//! Per-key running means with provenance
//!
//! Records are folded left to right into a [`GroupedMean`], one group per
//! distinct key, and then finalized into [`MeanEntry`] values. Finalizing
//! consumes the accumulator, so the sum-to-mean division runs exactly once
//! per key and nothing can be folded afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use jetstats::app::services::aggregator::GroupedMean;
//!
//! let mut groups = GroupedMean::new();
//! groups.fold("A", 10.0, "first");
//! groups.fold("A", 20.0, "second");
//! groups.fold("B", 5.0, "third");
//!
//! let entries = groups.finalize();
//! assert_eq!(entries[0].mean, 15.0);
//! assert_eq!(entries[0].provenance, vec!["first", "second"]);
//! ```

pub mod grouped_mean;
pub mod models;
pub mod ordered_groups;

#[cfg(test)]
pub mod tests;

pub use grouped_mean::{GroupedMean, MeanEntry, aggregate_by};
pub use models::aggregate_aircraft_models;
pub use ordered_groups::{OrderedGroups, merge_by_key};

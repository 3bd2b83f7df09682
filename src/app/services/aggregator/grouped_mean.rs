//! Generic two-phase mean accumulator

use std::hash::Hash;

use super::ordered_groups::OrderedGroups;

/// Finalized mean of one key
#[derive(Debug, Clone, PartialEq)]
pub struct MeanEntry<K, P> {
    pub key: K,
    /// Arithmetic mean of every folded value
    pub mean: f64,
    /// Number of folded values
    pub count: usize,
    /// Provenance of every folded value, in encounter order
    pub provenance: Vec<P>,
}

#[derive(Debug, Clone)]
struct Group<K, P> {
    key: K,
    sum: f64,
    count: usize,
    provenance: Vec<P>,
}

/// Accumulates per-key sums until [`finalize`](Self::finalize)
///
/// Groups are kept in first-seen order.
#[derive(Debug, Clone)]
pub struct GroupedMean<K, P> {
    groups: OrderedGroups<K, Group<K, P>>,
}

impl<K, P> Default for GroupedMean<K, P> {
    fn default() -> Self {
        Self {
            groups: OrderedGroups::default(),
        }
    }
}

impl<K: Eq + Hash + Clone, P> GroupedMean<K, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one value to the group of `key`, creating the group on first sight
    pub fn fold(&mut self, key: K, value: f64, provenance: P) {
        self.groups.upsert(
            key,
            (value, provenance),
            |key, (value, provenance)| Group {
                key: key.clone(),
                sum: value,
                count: 1,
                provenance: vec![provenance],
            },
            |group, (value, provenance)| {
                group.sum += value;
                group.count += 1;
                group.provenance.push(provenance);
            },
        );
    }

    /// Number of distinct keys seen so far
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Turn every running sum into a mean, in first-seen key order
    pub fn finalize(self) -> Vec<MeanEntry<K, P>> {
        self.groups
            .into_groups()
            .into_iter()
            .map(|group| MeanEntry {
                key: group.key,
                mean: group.sum / group.count as f64,
                count: group.count,
                provenance: group.provenance,
            })
            .collect()
    }
}

/// Fold `records` by key in one pass and finalize
///
/// # Arguments
/// * `key_fn` - Grouping key of a record
/// * `value_fn` - Quantity to average
/// * `provenance_fn` - Per-record metadata kept in encounter order
pub fn aggregate_by<R, K, P, FK, FV, FP>(
    records: impl IntoIterator<Item = R>,
    mut key_fn: FK,
    mut value_fn: FV,
    mut provenance_fn: FP,
) -> Vec<MeanEntry<K, P>>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&R) -> K,
    FV: FnMut(&R) -> f64,
    FP: FnMut(&R) -> P,
{
    let mut groups = GroupedMean::new();
    for record in records {
        groups.fold(key_fn(&record), value_fn(&record), provenance_fn(&record));
    }
    groups.finalize()
}

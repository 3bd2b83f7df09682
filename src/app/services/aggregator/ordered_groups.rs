//! Keyed groups kept in first-seen order

use std::collections::HashMap;
use std::hash::Hash;

/// Groups addressed by key, iterated in the order keys first appeared
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, G> {
    index: HashMap<K, usize>,
    groups: Vec<G>,
}

impl<K, G> Default for OrderedGroups<K, G> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<K: Eq + Hash, G> OrderedGroups<K, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `item` into the group of `key`
    ///
    /// The first item of a key becomes its group through `init`, which also
    /// sees the key; later items are folded in with `merge`.
    pub fn upsert<T>(
        &mut self,
        key: K,
        item: T,
        init: impl FnOnce(&K, T) -> G,
        merge: impl FnOnce(&mut G, T),
    ) {
        match self.index.get(&key) {
            Some(&position) => merge(&mut self.groups[position], item),
            None => {
                self.groups.push(init(&key, item));
                self.index.insert(key, self.groups.len() - 1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-seen key order
    pub fn into_groups(self) -> Vec<G> {
        self.groups
    }
}

/// Collapse `records` to one per key, in first-seen order
///
/// The first record of each key is kept and every later record with the same
/// key is folded into it with `merge`.
pub fn merge_by_key<R, K, FK, FM>(
    records: impl IntoIterator<Item = R>,
    mut key_fn: FK,
    mut merge: FM,
) -> Vec<R>
where
    K: Eq + Hash,
    FK: FnMut(&R) -> K,
    FM: FnMut(&mut R, R),
{
    let mut groups = OrderedGroups::new();
    for record in records {
        let key = key_fn(&record);
        groups.upsert(key, record, |_, first| first, |total, next| merge(total, next));
    }
    groups.into_groups()
}

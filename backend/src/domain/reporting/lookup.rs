//! In-memory join helpers.
//!
//! Reports fetch each table once, keyed by the distinct ids they need, then
//! match rows here instead of issuing one query per row.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Distinct keys in first-seen order.
pub fn distinct_ids<K, I>(ids: I) -> Vec<K>
where
    K: Copy + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Index `rows` by `key`. A later row with the same key replaces an earlier one.
pub fn index_by<K, V, F>(rows: impl IntoIterator<Item = V>, key: F) -> HashMap<K, V>
where
    K: Eq + Hash,
    F: Fn(&V) -> K,
{
    rows.into_iter().map(|row| (key(&row), row)).collect()
}

/// Group `rows` by `key`, preserving row order within each group.
pub fn group_by<K, V, F>(rows: impl IntoIterator<Item = V>, key: F) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash,
    F: Fn(&V) -> K,
{
    let mut groups: HashMap<K, Vec<V>> = HashMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_ids_keeps_first_occurrence_order() {
        assert_eq!(distinct_ids([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn index_by_keeps_last_row_per_key() {
        let index = index_by([("a", 1), ("b", 2), ("a", 3)], |row| row.0);
        assert_eq!(index.get("a"), Some(&("a", 3)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn group_by_preserves_row_order() {
        let groups = group_by([(1, 'x'), (2, 'y'), (1, 'z')], |row| row.0);
        assert_eq!(groups.get(&1), Some(&vec![(1, 'x'), (1, 'z')]));
    }
}

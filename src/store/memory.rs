//! BTreeMap-backed ordered store
//!
//! Keys iterate in byte-wise lexicographic order, which is the order every
//! key builder relies on. Writes exist for ingestion fixtures and tests;
//! the query path only reads.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::keyspace::KeyRange;

use super::errors::StoreResult;
use super::{KvStore, ScanControl};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts or replaces an entry
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    /// Removes `key`, returning whether it was present
    pub fn delete(&mut self, key: &[u8]) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes every entry in `range`, returning the removed keys in order
    pub fn delete_range(&mut self, range: &KeyRange) -> Vec<Vec<u8>> {
        if is_empty_range(range) {
            return Vec::new();
        }
        let doomed: Vec<Vec<u8>> = self
            .entries
            .range::<[u8], _>(bounds(range))
            .map(|(k, _)| k.clone())
            .collect();
        for key in &doomed {
            self.entries.remove(key);
        }
        doomed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }
}

fn is_empty_range(range: &KeyRange) -> bool {
    range
        .upper
        .as_deref()
        .is_some_and(|upper| upper <= range.lower.as_slice())
}

fn bounds(range: &KeyRange) -> (Bound<&[u8]>, Bound<&[u8]>) {
    let upper = match &range.upper {
        Some(upper) => Bound::Excluded(upper.as_slice()),
        None => Bound::Unbounded,
    };
    (Bound::Included(range.lower.as_slice()), upper)
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn scan(
        &self,
        range: &KeyRange,
        visit: &mut dyn FnMut(&[u8], &[u8]) -> ScanControl,
    ) -> StoreResult<()> {
        if is_empty_range(range) {
            return Ok(());
        }
        for (key, value) in self.entries.range::<[u8], _>(bounds(range)) {
            if visit(key, value) == ScanControl::Stop {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.put(vec![1, 0], b"a".to_vec());
        store.put(vec![1, 1], b"b".to_vec());
        store.put(vec![1, 1, 5], b"c".to_vec());
        store.put(vec![2], b"d".to_vec());
        store
    }

    #[test]
    fn test_get() {
        let store = sample();
        assert_eq!(store.get(&[1, 1]).unwrap(), Some(b"b".to_vec()));
        assert_eq!(store.get(&[9]).unwrap(), None);
    }

    #[test]
    fn test_scan_half_open() {
        let store = sample();
        let mut seen = Vec::new();
        store
            .scan(&KeyRange::new(vec![1, 0], Some(vec![2])), &mut |k, _| {
                seen.push(k.to_vec());
                ScanControl::Continue
            })
            .unwrap();
        assert_eq!(seen, vec![vec![1, 0], vec![1, 1], vec![1, 1, 5]]);
    }

    #[test]
    fn test_scan_stops_early() {
        let store = sample();
        let mut count = 0;
        store
            .scan(&KeyRange::new(Vec::new(), None), &mut |_, _| {
                count += 1;
                ScanControl::Stop
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_scan_empty_when_inverted() {
        let store = sample();
        let mut count = 0;
        store
            .scan(&KeyRange::new(vec![2], Some(vec![1])), &mut |_, _| {
                count += 1;
                ScanControl::Continue
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_delete_range() {
        let mut store = sample();
        let removed = store.delete_range(&KeyRange::prefix(&[1, 1]));
        assert_eq!(removed, vec![vec![1, 1], vec![1, 1, 5]]);
        assert_eq!(store.len(), 2);
    }
}

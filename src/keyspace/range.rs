//! Key ranges over the ordered store

use super::builders::{block_key, block_prefix, table_index_ref_key, table_index_ref_prefix};

/// Half-open byte range `[lower, upper)`; `upper == None` is unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub lower: Vec<u8>,
    pub upper: Option<Vec<u8>>,
}

impl KeyRange {
    /// Range from `lower` up to, excluding, `upper`; `None` is unbounded
    pub fn new(lower: Vec<u8>, upper: Option<Vec<u8>>) -> Self {
        Self { lower, upper }
    }

    /// Every key that starts with `prefix`
    pub fn prefix(prefix: &[u8]) -> Self {
        Self::starting_at(prefix.to_vec(), prefix)
    }

    /// Keys at or after `lower` that still start with `prefix`
    pub fn starting_at(lower: Vec<u8>, prefix: &[u8]) -> Self {
        Self {
            lower,
            upper: prefix_end(prefix),
        }
    }

    /// Whether `key` falls inside the range
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.lower.as_slice()
            && self.upper.as_deref().map_or(true, |upper| key < upper)
    }
}

/// Turns `key` into the smallest key greater than every key it prefixes.
///
/// Returns `false`, leaving `key` all zero, when every byte was 0xFF and no
/// such key exists.
pub fn increment_key(key: &mut [u8]) -> bool {
    for byte in key.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            return true;
        }
    }
    false
}

/// Exclusive end of the range of keys starting with `prefix`
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    // trailing 0xFF bytes cannot be incremented in place
    while end.last() == Some(&0xff) {
        end.pop();
    }
    if end.is_empty() {
        return None;
    }
    increment_key(&mut end);
    Some(end)
}

/// The two ranges whose removal drops all data for blocks `>= block`.
///
/// The first covers every block-scoped record; the second covers the index
/// references those blocks wrote, which name the secondary-index entries
/// that must go with them.
pub fn erase_ranges_from(block: u32) -> [KeyRange; 2] {
    [
        KeyRange::new(block_key(block).into_vec(), prefix_end(block_prefix().as_slice())),
        KeyRange::new(
            table_index_ref_key(block).into_vec(),
            prefix_end(table_index_ref_prefix().as_slice()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_carries() {
        let mut key = vec![0x01, 0xff];
        assert!(increment_key(&mut key));
        assert_eq!(key, vec![0x02, 0x00]);
    }

    #[test]
    fn test_increment_overflow() {
        let mut key = vec![0xff, 0xff];
        assert!(!increment_key(&mut key));
    }

    #[test]
    fn test_prefix_end_strips_ff() {
        assert_eq!(prefix_end(&[0x70, 0x01, 0xff]), Some(vec![0x70, 0x02]));
        assert_eq!(prefix_end(&[0xff]), None);
        assert_eq!(prefix_end(&[]), None);
    }

    #[test]
    fn test_prefix_range_contains() {
        let range = KeyRange::prefix(&[0x70, 0x05]);
        assert!(range.contains(&[0x70, 0x05]));
        assert!(range.contains(&[0x70, 0x05, 0xff, 0xff]));
        assert!(!range.contains(&[0x70, 0x06]));
        assert!(!range.contains(&[0x70, 0x04, 0xff]));
    }

    #[test]
    fn test_erase_ranges_shape() {
        let [blocks, refs] = erase_ranges_from(10);
        assert_eq!(blocks.lower, vec![0x20, 0, 0, 0, 10]);
        assert_eq!(blocks.upper, Some(vec![0x21]));
        assert_eq!(refs.lower, vec![0x80, 0, 0, 0, 10]);
        assert_eq!(refs.upper, Some(vec![0x81]));
        assert!(!blocks.contains(&[0x20, 0, 0, 0, 9, 0x30]));
        assert!(blocks.contains(&[0x20, 0, 0, 0, 10, 0x30]));
    }
}

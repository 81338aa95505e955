//! Keyspace Layout Tests
//!
//! Ordering guarantees the executor relies on, checked against a real
//! ordered store:
//! - A prefix scan returns exactly the prefixed entries, ascending
//! - State suffixes order revisions newest first, live before tombstone
//! - Deleting blocks >= N takes exactly two range deletions

use histql::codec::{encode_key, KeyBuffer, Symbol};
use histql::keyspace::{
    append_delta_key, append_state_suffix, append_state_suffix_present, block_info_key,
    decode_state_suffix, describe_key, erase_ranges_from, fill_status_key, increment_key,
    prefix_end, received_block_key, table_index_key, table_index_ref_full_key, KeyRange, KeyTag,
};
use histql::store::{KvStore, MemoryStore, ScanControl};

// =============================================================================
// Helper Functions
// =============================================================================

const ACCOUNT: Symbol = Symbol::from_text("account");
const BY_NAME: Symbol = Symbol::from_text("acct.name");

fn index_prefix(name: &str) -> KeyBuffer {
    let mut key = table_index_key(ACCOUNT, BY_NAME);
    key.append(&encode_key(&Symbol::from_text(name)));
    key
}

fn state_entry(name: &str, block: u32, present: bool) -> Vec<u8> {
    let mut key = index_prefix(name);
    append_state_suffix_present(&mut key, block, present);
    key.into_vec()
}

fn collect(store: &MemoryStore, range: &KeyRange) -> Vec<Vec<u8>> {
    let mut keys = Vec::new();
    store
        .scan(range, &mut |key, _| {
            keys.push(key.to_vec());
            ScanControl::Continue
        })
        .unwrap();
    keys
}

fn blocks_of(store: &MemoryStore, range: &KeyRange) -> Vec<(u32, bool)> {
    collect(store, range)
        .iter()
        .map(|k| decode_state_suffix(k).unwrap())
        .collect()
}

// =============================================================================
// Prefix Scans
// =============================================================================

#[test]
fn test_prefix_scan_exact() {
    let mut store = MemoryStore::new();
    for name in ["bob", "alice", "carol"] {
        store.put(state_entry(name, 1, true), vec![]);
    }
    // a different index under the same table
    let mut other = table_index_key(ACCOUNT, Symbol::from_text("acct.other"));
    other.append(&[0; 13]);
    store.put(other.into_vec(), vec![]);

    let prefix = table_index_key(ACCOUNT, BY_NAME);
    let keys = collect(&store, &KeyRange::prefix(prefix.as_slice()));
    assert_eq!(
        keys,
        vec![
            state_entry("alice", 1, true),
            state_entry("bob", 1, true),
            state_entry("carol", 1, true),
        ]
    );
}

#[test]
fn test_increment_skips_subkey() {
    let mut store = MemoryStore::new();
    for block in [1, 2, 3] {
        store.put(state_entry("alice", block, true), vec![]);
    }
    store.put(state_entry("bob", 1, true), vec![]);

    let mut next = index_prefix("alice").into_vec();
    assert!(increment_key(&mut next));
    let prefix = table_index_key(ACCOUNT, BY_NAME);
    let keys = collect(&store, &KeyRange::starting_at(next, prefix.as_slice()));
    assert_eq!(keys, vec![state_entry("bob", 1, true)]);
}

#[test]
fn test_prefix_end_edges() {
    assert_eq!(prefix_end(&[0x70, 0x01]), Some(vec![0x70, 0x02]));
    assert_eq!(prefix_end(&[0x70, 0xff]), Some(vec![0x71]));
    assert_eq!(prefix_end(&[0xff, 0xff]), None);
}

// =============================================================================
// State Suffix Ordering
// =============================================================================

/// Revisions at blocks 5, 7 and 10 seen from bounds 10, 6 and 4.
#[test]
fn test_descending_block_suffix() {
    let mut store = MemoryStore::new();
    for block in [5, 7, 10] {
        store.put(state_entry("alice", block, true), vec![]);
    }
    let prefix = index_prefix("alice");
    let from = |bound: u32| {
        let mut lower = index_prefix("alice");
        append_state_suffix(&mut lower, bound);
        KeyRange::starting_at(lower.into_vec(), prefix.as_slice())
    };

    assert_eq!(blocks_of(&store, &from(10)).first(), Some(&(10, true)));
    assert_eq!(blocks_of(&store, &from(6)).first(), Some(&(5, true)));
    assert!(blocks_of(&store, &from(4)).is_empty());
    assert_eq!(
        blocks_of(&store, &KeyRange::prefix(prefix.as_slice())),
        vec![(10, true), (7, true), (5, true)]
    );
}

#[test]
fn test_live_before_tombstone() {
    let mut store = MemoryStore::new();
    store.put(state_entry("alice", 7, false), vec![]);
    store.put(state_entry("alice", 7, true), vec![]);
    let prefix = index_prefix("alice");
    assert_eq!(
        blocks_of(&store, &KeyRange::prefix(prefix.as_slice())),
        vec![(7, true), (7, false)]
    );
}

// =============================================================================
// Block Erasure
// =============================================================================

/// Erasing blocks >= 3 keeps earlier blocks and every unscoped record, and
/// the removed back-references name exactly the index entries to drop.
#[test]
fn test_erase_ranges_from_block() {
    let mut store = MemoryStore::new();
    store.put(fill_status_key().into_vec(), vec![1]);
    for block in 1..=5u32 {
        store.put(received_block_key(block).into_vec(), vec![]);
        store.put(block_info_key(block).into_vec(), vec![]);

        let mut delta = KeyBuffer::new();
        append_delta_key(&mut delta, block, true, ACCOUNT);
        delta.append(&encode_key(&Symbol::from_text("alice")));
        let index = state_entry("alice", block, true);
        store.put(delta.as_slice().to_vec(), vec![]);
        store.put(index.clone(), delta.as_slice().to_vec());
        store.put(
            table_index_ref_full_key(block, delta.as_slice(), &index).into_vec(),
            vec![],
        );
    }

    let [blocks, refs] = erase_ranges_from(3);
    let removed_blocks = store.delete_range(&blocks);
    assert_eq!(removed_blocks.len(), 3 * 3);
    let removed_refs = store.delete_range(&refs);
    assert_eq!(removed_refs.len(), 3);

    // each back-reference ends with the index entry it covers
    for reference in &removed_refs {
        let index: Vec<u8> = (3..=5u32)
            .map(|b| state_entry("alice", b, true))
            .find(|index| reference.ends_with(index))
            .expect("back-reference names a removed block's index entry");
        assert!(store.delete(&index));
    }

    let remaining_tags: Vec<Option<KeyTag>> =
        store.keys().map(|k| KeyTag::from_u8(k[0])).collect();
    assert!(remaining_tags.contains(&Some(KeyTag::FillStatus)));
    let refs_left = remaining_tags
        .iter()
        .filter(|t| **t == Some(KeyTag::TableIndexRef))
        .count();
    assert_eq!(refs_left, 2);
    for block in 1..=2u32 {
        assert!(store.get(received_block_key(block).as_slice()).unwrap().is_some());
        assert!(store.get(&state_entry("alice", block, true)).unwrap().is_some());
    }
    for block in 3..=5u32 {
        assert!(store.get(received_block_key(block).as_slice()).unwrap().is_none());
        assert!(store.get(&state_entry("alice", block, true)).unwrap().is_none());
    }
}

// =============================================================================
// Key Description
// =============================================================================

#[test]
fn test_describe_delta_key() {
    let mut delta = KeyBuffer::new();
    append_delta_key(&mut delta, 42, true, ACCOUNT);
    delta.append(&[0xab, 0xcd]);
    assert_eq!(
        describe_key(delta.as_slice()),
        "block 42 table_delta 'account' present: true abcd"
    );
    assert_eq!(describe_key(&[]), "(empty)");
}

// =============================================================================
// Property Tests
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Larger blocks sort first; at one block the live entry precedes
        /// the tombstone.
        #[test]
        fn prop_state_suffix_order(
            a in (any::<u32>(), any::<bool>()),
            b in (any::<u32>(), any::<bool>())
        ) {
            let (ka, kb) = (state_entry("alice", a.0, a.1), state_entry("alice", b.0, b.1));
            let expected = b.0.cmp(&a.0).then(b.1.cmp(&a.1));
            prop_assert_eq!(ka.cmp(&kb), expected);
            prop_assert_eq!(decode_state_suffix(&ka), Some(a));
        }
    }
}

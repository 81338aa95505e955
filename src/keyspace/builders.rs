//! Composite key builders
//!
//! ```text
//! Category                  Key
//! fill status               fill_status
//! received block            block, block_num, received_block
//! table row (history)       block, block_num, table_row, table, primary key fields
//! table delta (state)       block, block_num, table_delta, table, present, primary key fields
//! table index (history)     table_index, table, index, index fields
//! table index (state)       table_index, table, index, index fields, ~block_num, !present
//! table index reference     table_index_ref, block_num, row key, index key
//! ```
//!
//! `append_*` functions extend a caller-owned buffer so a fixed prefix can
//! be completed with further encoded fields; `*_key` functions return a
//! fresh buffer.

use crate::codec::{Checksum256, KeyBuffer, KeyCodec, Symbol};

use super::tag::KeyTag;

/// Symbol of the block summary table
pub const BLOCK_INFO_TABLE: Symbol = Symbol::from_text("block.info");
/// Symbol of the transaction trace table
pub const TRANSACTION_TRACE_TABLE: Symbol = Symbol::from_text("ttrace");
/// Symbol of the action trace table
pub const ACTION_TRACE_TABLE: Symbol = Symbol::from_text("atrace");

/// Width of the `~block_num, !present` suffix on state-table index keys
pub const STATE_SUFFIX_LEN: usize = <u32 as KeyCodec>::SIZE + <bool as KeyCodec>::SIZE;

fn append_tag(dest: &mut KeyBuffer, tag: KeyTag) {
    tag.as_u8().append_key(dest);
}

fn tagged(tag: KeyTag) -> KeyBuffer {
    let mut key = KeyBuffer::new();
    append_tag(&mut key, tag);
    key
}

/// Single key holding the fill status record
pub fn fill_status_key() -> KeyBuffer {
    tagged(KeyTag::FillStatus)
}

/// Prefix shared by every block-scoped record
pub fn block_prefix() -> KeyBuffer {
    tagged(KeyTag::Block)
}

/// Appends the block tag and block number
pub fn append_block_key(dest: &mut KeyBuffer, block: u32) {
    append_tag(dest, KeyTag::Block);
    block.append_key(dest);
}

/// Prefix of every record belonging to `block`
pub fn block_key(block: u32) -> KeyBuffer {
    let mut key = KeyBuffer::new();
    append_block_key(&mut key, block);
    key
}

/// Key of the received-block record for `block`
pub fn received_block_key(block: u32) -> KeyBuffer {
    let mut key = block_key(block);
    append_tag(&mut key, KeyTag::ReceivedBlock);
    key
}

/// Prefix of every history-table row in `block`
pub fn table_row_key(block: u32) -> KeyBuffer {
    let mut key = block_key(block);
    append_tag(&mut key, KeyTag::TableRow);
    key
}

/// Row key of the block-info row for `block`
pub fn block_info_key(block: u32) -> KeyBuffer {
    let mut key = table_row_key(block);
    BLOCK_INFO_TABLE.append_key(&mut key);
    key
}

/// Appends the row key of a transaction trace
pub fn append_transaction_trace_key(dest: &mut KeyBuffer, block: u32, transaction_id: &Checksum256) {
    append_block_key(dest, block);
    append_tag(dest, KeyTag::TableRow);
    TRANSACTION_TRACE_TABLE.append_key(dest);
    transaction_id.append_key(dest);
}

/// Appends the row key of one action within a transaction trace
pub fn append_action_trace_key(
    dest: &mut KeyBuffer,
    block: u32,
    transaction_id: &Checksum256,
    action_index: u32,
) {
    append_block_key(dest, block);
    append_tag(dest, KeyTag::TableRow);
    ACTION_TRACE_TABLE.append_key(dest);
    transaction_id.append_key(dest);
    action_index.append_key(dest);
}

/// Prefix of every state-table delta in `block`
pub fn append_delta_prefix(dest: &mut KeyBuffer, block: u32) {
    append_block_key(dest, block);
    append_tag(dest, KeyTag::TableDelta);
}

/// Delta prefix for one table; primary key fields follow
pub fn append_delta_key(dest: &mut KeyBuffer, block: u32, present: bool, table: Symbol) {
    append_delta_prefix(dest, block);
    table.append_key(dest);
    present.append_key(dest);
}

/// Appends the tag shared by every secondary index entry
pub fn append_table_index_prefix(dest: &mut KeyBuffer) {
    append_tag(dest, KeyTag::TableIndex);
}

/// Appends the prefix of one index over one table
pub fn append_table_index_key(dest: &mut KeyBuffer, table: Symbol, index: Symbol) {
    append_tag(dest, KeyTag::TableIndex);
    table.append_key(dest);
    index.append_key(dest);
}

/// Fixed prefix of one secondary index; index fields follow
pub fn table_index_key(table: Symbol, index: Symbol) -> KeyBuffer {
    let mut key = KeyBuffer::new();
    append_table_index_key(&mut key, table, index);
    key
}

/// Appends `~block`. Scanning forward from here visits revisions at or
/// before `block`, newest first.
pub fn append_state_suffix(dest: &mut KeyBuffer, block: u32) {
    (!block).append_key(dest);
}

/// Appends `~block, !present`; a live revision sorts before its tombstone.
pub fn append_state_suffix_present(dest: &mut KeyBuffer, block: u32, present: bool) {
    append_state_suffix(dest, block);
    (!present).append_key(dest);
}

/// Splits a state-table index key into its block number and presence flag
pub fn decode_state_suffix(key: &[u8]) -> Option<(u32, bool)> {
    if key.len() < STATE_SUFFIX_LEN {
        return None;
    }
    let suffix = &key[key.len() - STATE_SUFFIX_LEN..];
    let inverted = crate::codec::decode_key::<u32>(suffix).ok()?;
    Some((!inverted, suffix[4] == 0))
}

/// Prefix of every index back-reference
pub fn table_index_ref_prefix() -> KeyBuffer {
    tagged(KeyTag::TableIndexRef)
}

/// Prefix of every index reference recorded for `block`
pub fn table_index_ref_key(block: u32) -> KeyBuffer {
    let mut key = table_index_ref_prefix();
    block.append_key(&mut key);
    key
}

/// Prefix of the index references a row wrote in `block`
pub fn table_index_ref_row_key(block: u32, row_key: &[u8]) -> KeyBuffer {
    let mut key = table_index_ref_key(block);
    key.append(row_key);
    key
}

/// Full reference entry tying an index entry to the block that wrote it
pub fn table_index_ref_full_key(block: u32, row_key: &[u8], index_key: &[u8]) -> KeyBuffer {
    let mut key = table_index_ref_row_key(block, row_key);
    key.append(index_key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_key;

    #[test]
    fn test_received_block_layout() {
        let key = received_block_key(0x0102_0304);
        assert_eq!(key.as_slice(), &[0x20, 1, 2, 3, 4, 0x30]);
    }

    #[test]
    fn test_table_index_layout() {
        let table = Symbol::from_text("account");
        let index = Symbol::from_text("acct.name");
        let key = table_index_key(table, index);
        let mut expected = vec![0x70];
        expected.extend(encode_key(&table));
        expected.extend(encode_key(&index));
        assert_eq!(key.into_vec(), expected);
    }

    #[test]
    fn test_delta_key_layout() {
        let mut key = KeyBuffer::new();
        append_delta_key(&mut key, 5, true, Symbol::from_text("account"));
        let bytes = key.into_vec();
        assert_eq!(&bytes[..6], &[0x20, 0, 0, 0, 5, 0x60]);
        assert_eq!(*bytes.last().unwrap(), 1);
    }

    #[test]
    fn test_state_suffix_descending() {
        let mut newer = KeyBuffer::new();
        append_state_suffix_present(&mut newer, 10, true);
        let mut older = KeyBuffer::new();
        append_state_suffix_present(&mut older, 5, true);
        assert!(newer < older);
    }

    #[test]
    fn test_present_before_tombstone() {
        let mut live = KeyBuffer::new();
        append_state_suffix_present(&mut live, 7, true);
        let mut dead = KeyBuffer::new();
        append_state_suffix_present(&mut dead, 7, false);
        assert!(live < dead);
    }

    #[test]
    fn test_decode_state_suffix() {
        let mut key = KeyBuffer::from_vec(vec![0x70, 9, 9]);
        append_state_suffix_present(&mut key, 42, false);
        assert_eq!(decode_state_suffix(key.as_slice()), Some((42, false)));
        assert_eq!(decode_state_suffix(&[1, 2]), None);
    }

    #[test]
    fn test_action_trace_extends_transaction_trace() {
        let txid = Checksum256::new([3; 32]);
        let mut trx = KeyBuffer::new();
        append_transaction_trace_key(&mut trx, 8, &txid);
        let mut action = KeyBuffer::new();
        append_action_trace_key(&mut action, 8, &txid, 2);
        assert_ne!(trx.as_slice()[6..14], action.as_slice()[6..14]);
        assert_eq!(action.len(), 1 + 4 + 1 + 8 + 32 + 4);
    }

    #[test]
    fn test_index_ref_keys_nest() {
        let full = table_index_ref_full_key(3, &[1, 2], &[7]);
        assert!(full.as_slice().starts_with(table_index_ref_row_key(3, &[1, 2]).as_slice()));
        assert!(full.as_slice().starts_with(table_index_ref_key(3).as_slice()));
    }
}

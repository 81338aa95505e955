//! Keyspace Layout subsystem
//!
//! Defines the tag taxonomy and a pure builder for every record category.
//! All key components go through the Key Codec, so byte order of whole
//! keys follows the semantic order of their fields.
//!
//! # Invariants
//!
//! - Records of one block share the prefix `block, block_num`; blocks sort
//!   ascending.
//! - Within one state-table index prefix, revisions sort by descending block
//!   and a live revision sorts before a tombstone of the same block.
//! - Removing blocks `>= n` is exactly the two ranges of
//!   [`erase_ranges_from`].

mod builders;
mod describe;
mod range;
mod tag;

pub use builders::{
    append_action_trace_key, append_block_key, append_delta_key, append_delta_prefix,
    append_state_suffix, append_state_suffix_present, append_table_index_key,
    append_table_index_prefix, append_transaction_trace_key, block_info_key, block_key,
    block_prefix, decode_state_suffix, fill_status_key, received_block_key, table_index_key,
    table_index_ref_full_key, table_index_ref_key, table_index_ref_prefix,
    table_index_ref_row_key, table_row_key, ACTION_TRACE_TABLE, BLOCK_INFO_TABLE,
    STATE_SUFFIX_LEN, TRANSACTION_TRACE_TABLE,
};
pub use describe::describe_key;
pub use range::{erase_ranges_from, increment_key, prefix_end, KeyRange};
pub use tag::KeyTag;

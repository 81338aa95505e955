//! Metadata accessors
//!
//! Point reads of ingestion progress and recorded block ids, built on the
//! same keyspace as the query executor.

mod errors;
mod records;

pub use errors::{MetadataError, MetadataResult};
pub use records::{FillStatus, ReceivedBlock};

use crate::codec::Checksum256;
use crate::keyspace::{fill_status_key, received_block_key};
use crate::observability::{log_event, Event};
use crate::store::KvStore;

/// Reads the fill status; a fresh store yields the default record
pub fn get_fill_status<S: KvStore + ?Sized>(store: &S) -> MetadataResult<FillStatus> {
    let status = match store.get(fill_status_key().as_slice())? {
        Some(bytes) => FillStatus::from_bytes(&bytes)?,
        None => FillStatus::default(),
    };
    let head = status.head.to_string();
    log_event(Event::MetadataRead, &[("record", "fill_status"), ("head", head.as_str())]);
    Ok(status)
}

/// Id of a recorded block, or `None` if the block was never received
pub fn get_block_id<S: KvStore + ?Sized>(store: &S, block_num: u32) -> MetadataResult<Option<Checksum256>> {
    match store.get(received_block_key(block_num).as_slice())? {
        Some(bytes) => Ok(Some(ReceivedBlock::from_bytes(&bytes)?.block_id)),
        None => Ok(None),
    }
}

//! Ordered key-value store interface
//!
//! The query layer consumes a store through [`KvStore`]: point reads and
//! forward iteration over a half-open key range. A single query call
//! assumes the store presents it one consistent view; snapshotting is the
//! store's job.

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use crate::keyspace::KeyRange;

/// Returned by a scan visitor to continue or end iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// Read access to an ordered byte-key/byte-value store
pub trait KvStore {
    /// Point read
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Visits entries of `range` in ascending key order until the visitor
    /// returns [`ScanControl::Stop`] or the range is exhausted
    fn scan(
        &self,
        range: &KeyRange,
        visit: &mut dyn FnMut(&[u8], &[u8]) -> ScanControl,
    ) -> StoreResult<()>;

    /// First entry of `range`, if any
    fn first_in(&self, range: &KeyRange) -> StoreResult<Option<(Vec<u8>, Vec<u8>)>> {
        let mut found = None;
        self.scan(range, &mut |key, value| {
            found = Some((key.to_vec(), value.to_vec()));
            ScanControl::Stop
        })?;
        Ok(found)
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn scan(
        &self,
        range: &KeyRange,
        visit: &mut dyn FnMut(&[u8], &[u8]) -> ScanControl,
    ) -> StoreResult<()> {
        (**self).scan(range, visit)
    }
}

//! Query sessions
//!
//! A session pins the fill status it saw when opened and answers metadata
//! and query calls against one store.

use crate::codec::Checksum256;
use crate::metadata::{get_block_id, get_fill_status, FillStatus};
use crate::schema::Registry;
use crate::store::KvStore;

use super::errors::ExecutorResult;
use super::executor::QueryExecutor;
use super::result::ExecutionResult;

pub struct QuerySession<'a, S: KvStore + ?Sized> {
    executor: QueryExecutor<'a, S>,
    store: &'a S,
    fill_status: FillStatus,
}

impl<'a, S: KvStore + ?Sized> QuerySession<'a, S> {
    /// Opens a session, reading the current fill status
    pub fn open(registry: &'a Registry, store: &'a S) -> ExecutorResult<Self> {
        let fill_status = get_fill_status(store)?;
        Ok(Self {
            executor: QueryExecutor::new(registry, store),
            store,
            fill_status,
        })
    }

    /// Fill status as of [`QuerySession::open`]
    pub fn fill_status(&self) -> FillStatus {
        self.fill_status
    }

    /// Id of a received block, if the store has it
    pub fn block_id(&self, block_num: u32) -> ExecutorResult<Option<Checksum256>> {
        Ok(get_block_id(self.store, block_num)?)
    }

    /// See [`QueryExecutor::query_database`]
    pub fn query_database(&self, request: &[u8], head: u32) -> ExecutorResult<Vec<u8>> {
        self.executor.query_database(request, head)
    }

    pub fn execute(&self, request: &[u8], head: u32) -> ExecutorResult<ExecutionResult> {
        self.executor.execute(request, head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TypeRegistry;
    use crate::keyspace::{fill_status_key, received_block_key};
    use crate::metadata::ReceivedBlock;
    use crate::schema::QueryConfig;
    use crate::store::MemoryStore;

    #[test]
    fn test_fill_status_read_at_open() {
        let registry = Registry::prepare(&QueryConfig::default(), &TypeRegistry::standard()).unwrap();
        let mut store = MemoryStore::new();
        let status = FillStatus {
            head: 42,
            ..FillStatus::default()
        };
        store.put(fill_status_key().into_vec(), status.to_bytes());

        let session = QuerySession::open(&registry, &store).unwrap();
        assert_eq!(session.fill_status().head, 42);
    }

    #[test]
    fn test_block_id() {
        let registry = Registry::prepare(&QueryConfig::default(), &TypeRegistry::standard()).unwrap();
        let mut store = MemoryStore::new();
        let block = ReceivedBlock {
            block_num: 3,
            block_id: Checksum256::new([3; 32]),
        };
        store.put(received_block_key(3).into_vec(), block.to_bytes());
        let session = QuerySession::open(&registry, &store).unwrap();
        assert_eq!(session.block_id(3).unwrap(), Some(block.block_id));
        assert_eq!(session.block_id(4).unwrap(), None);
    }
}

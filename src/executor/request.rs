//! Query request wire format
//!
//! ```text
//! query name     8 bytes, little-endian symbol
//! block bound    4 bytes, little-endian; only when the query limits blocks
//! range args     each range-key field in native encoding
//! result cap     4 bytes, little-endian
//! ```

use crate::codec::{CodecResult, InputBuffer, KeyBuffer, Symbol};
use crate::keyspace::table_index_key;
use crate::schema::{Query, Registry};

use super::errors::{ExecutorError, ExecutorResult};

/// A decoded request, bound to its prepared query
#[derive(Debug, Clone)]
pub struct QueryRequest<'r> {
    pub query: &'r Query,
    /// Caller's block bound, if the query takes one
    pub block_bound: Option<u32>,
    /// Index prefix: table index key followed by the encoded range args
    pub prefix: KeyBuffer,
    /// Caller's result cap
    pub max_results: u32,
}

impl<'r> QueryRequest<'r> {
    /// Decodes `bytes` against `registry`.
    ///
    /// Resolution happens before any argument is read, so an unknown or
    /// unsupported query is reported as such even when its arguments are
    /// malformed.
    pub fn decode(registry: &'r Registry, bytes: &[u8]) -> ExecutorResult<Self> {
        let mut input = InputBuffer::new(bytes);
        let name = Symbol::new(input.read_u64()?);
        let query = registry
            .query(name)
            .ok_or_else(|| ExecutorError::unknown_query(name))?;
        if !query.arg_types.is_empty() {
            return Err(ExecutorError::not_implemented(name));
        }

        let block_bound = if query.limit_block_num {
            Some(input.read_u32()?)
        } else {
            None
        };

        let table = registry.table_of(query);
        let mut prefix = table_index_key(table.short_name, query.name);
        for ty in &query.range_types {
            ty.query_to_key(&mut input, &mut prefix)?;
        }

        let max_results = input.read_u32()?;
        Ok(Self {
            query,
            block_bound,
            prefix,
            max_results,
        })
    }

    /// Newest block whose revisions are visible: the caller's bound clamped
    /// to `head`, or every block when the query takes no bound
    pub fn effective_bound(&self, head: u32) -> u32 {
        match self.block_bound {
            Some(bound) => bound.min(head),
            None => u32::MAX,
        }
    }

    /// Rows this request may return
    pub fn result_cap(&self) -> u32 {
        self.max_results.min(self.query.max_results)
    }
}

/// Builds request bytes for a query
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    bytes: Vec<u8>,
}

impl RequestBuilder {
    /// Starts a request for `query`
    pub fn new(query: Symbol) -> Self {
        Self {
            bytes: query.value().to_le_bytes().to_vec(),
        }
    }

    /// Sets the block bound; only valid for block-limited queries
    pub fn block_bound(mut self, block: u32) -> Self {
        self.bytes.extend_from_slice(&block.to_le_bytes());
        self
    }

    /// Appends one range argument in native encoding
    pub fn arg(mut self, native: &[u8]) -> Self {
        self.bytes.extend_from_slice(native);
        self
    }

    /// Appends the result cap and returns the finished request
    pub fn max_results(mut self, cap: u32) -> Vec<u8> {
        self.bytes.extend_from_slice(&cap.to_le_bytes());
        self.bytes
    }
}

/// Reads a bare query name, for logging requests that fail to decode
pub fn peek_query_name(bytes: &[u8]) -> CodecResult<Symbol> {
    InputBuffer::new(bytes).read_u64().map(Symbol::new)
}

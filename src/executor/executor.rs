//! Query executor
//!
//! Turns a serialized request into bounded range scans over one secondary
//! index, with at most one join hop per row.
//!
//! Execution flow (strict order):
//! 1. Resolve the query name; reject unknown queries and queries that
//!    declare non-range arguments
//! 2. Decode the block bound (if any), range arguments and result cap
//! 3. Walk distinct index keys under the request prefix in ascending order
//! 4. For state tables, pick the newest revision at or before the bound;
//!    a tombstone there means the row is absent
//! 5. Fetch the referenced row and follow the join, dropping rows whose
//!    join lookup finds nothing
//! 6. Stop once the result cap is reached, then encode the rows

use crate::codec::{CodecError, InputBuffer, KeyBuffer};
use crate::keyspace::{
    append_state_suffix, decode_state_suffix, increment_key, table_index_key, KeyRange,
    STATE_SUFFIX_LEN,
};
use crate::observability::{log_event, trace_event, Event};
use crate::schema::{Field, Join, Registry, Table};
use crate::store::KvStore;

use super::errors::{ExecutorError, ExecutorResult};
use super::request::{peek_query_name, QueryRequest};
use super::result::ExecutionResult;

/// Executes prepared queries against a read-only store.
///
/// Holds no state between calls; one executor may serve any number of
/// queries, from any number of threads if the store allows it.
pub struct QueryExecutor<'a, S: KvStore + ?Sized> {
    registry: &'a Registry,
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> QueryExecutor<'a, S> {
    /// Binds a prepared registry to a store
    pub fn new(registry: &'a Registry, store: &'a S) -> Self {
        Self { registry, store }
    }

    /// Executes a request and returns the encoded row sequence.
    ///
    /// `head` is the newest block visible to the caller; a request's own
    /// block bound is clamped to it.
    pub fn query_database(&self, request: &[u8], head: u32) -> ExecutorResult<Vec<u8>> {
        self.execute(request, head)?.encode()
    }

    /// Executes a request and returns the rows before encoding
    pub fn execute(&self, request: &[u8], head: u32) -> ExecutorResult<ExecutionResult> {
        let name = peek_query_name(request)
            .map(|n| n.to_string())
            .unwrap_or_default();
        let head_text = head.to_string();
        log_event(
            Event::QueryReceived,
            &[("query", name.as_str()), ("head", head_text.as_str())],
        );

        match self.run(request, head) {
            Ok(result) => {
                let rows = result.len().to_string();
                let matched = result.matched.to_string();
                let misses = result.join_misses.to_string();
                log_event(
                    Event::QueryExecuted,
                    &[
                        ("query", name.as_str()),
                        ("rows", rows.as_str()),
                        ("matched", matched.as_str()),
                        ("join_misses", misses.as_str()),
                    ],
                );
                Ok(result)
            }
            Err(err) => {
                log_event(
                    Event::QueryRejected,
                    &[
                        ("query", name.as_str()),
                        ("code", err.code().code()),
                        ("message", err.message()),
                    ],
                );
                Err(err)
            }
        }
    }

    fn run(&self, bytes: &[u8], head: u32) -> ExecutorResult<ExecutionResult> {
        let request = QueryRequest::decode(self.registry, bytes)?;
        let query = request.query;
        let table = self.registry.table_of(query);
        let bound = request.effective_bound(head);
        let cap = request.result_cap() as usize;

        let mut result = ExecutionResult::empty();
        let prefix = request.prefix.as_slice();
        let suffix_len = if query.is_state { STATE_SUFFIX_LEN } else { 0 };
        let mut lower = prefix.to_vec();

        while result.matched < cap {
            let range = KeyRange::starting_at(lower, prefix);
            let (key, value) = match self.first(&range, "index scan")? {
                Some(entry) => entry,
                None => break,
            };
            if key.len() < prefix.len() + suffix_len {
                return Err(CodecError::Truncated {
                    needed: prefix.len() + suffix_len,
                    remaining: key.len(),
                }
                .into());
            }
            let subkey = &key[..key.len() - suffix_len];

            let row_key = if query.is_state {
                self.visible_revision(subkey, bound)?
            } else {
                Some(value)
            };
            if let Some(row_key) = row_key {
                result.matched += 1;
                let mut row = self.fetch_row(&row_key)?;
                match &query.join {
                    Some(join) => {
                        if self.append_join(table, join, &mut row, bound)? {
                            result.rows.push(row);
                        } else {
                            result.join_misses += 1;
                            let key_hex = hex::encode(subkey);
                            trace_event(Event::JoinMiss, &[("index_key", key_hex.as_str())]);
                        }
                    }
                    None => result.rows.push(row),
                }
            }

            lower = subkey.to_vec();
            if !increment_key(&mut lower) {
                break;
            }
        }

        Ok(result)
    }

    /// Row key of the newest revision of `subkey` at or before `bound`, or
    /// `None` if there is none or it is a tombstone
    fn visible_revision(&self, subkey: &[u8], bound: u32) -> ExecutorResult<Option<Vec<u8>>> {
        let mut lower = KeyBuffer::from_vec(subkey.to_vec());
        append_state_suffix(&mut lower, bound);
        let range = KeyRange::starting_at(lower.into_vec(), subkey);
        match self.first(&range, "state lookup")? {
            Some((key, value)) => match decode_state_suffix(&key) {
                Some((_, true)) => Ok(Some(value)),
                Some((_, false)) => Ok(None),
                None => Err(CodecError::Truncated {
                    needed: STATE_SUFFIX_LEN,
                    remaining: key.len(),
                }
                .into()),
            },
            None => Ok(None),
        }
    }

    /// Probes the join index with key fields taken from `row`; on a match,
    /// appends the joined row's selected fields to `row`
    fn append_join(&self, table: &Table, join: &Join, row: &mut Vec<u8>, bound: u32) -> ExecutorResult<bool> {
        let join_table = self.registry.table_at(join.table);
        let join_query = self.registry.query_at(join.query);

        let mut prefix = table_index_key(join_table.short_name, join_query.name);
        for &index in &join.key_values {
            let field = table.field(index);
            let mut src = field_input(field, row.as_slice())?;
            field.key_type.row_to_key(&mut src, &mut prefix)?;
        }

        let joined_key = if join_query.is_state {
            self.visible_revision(prefix.as_slice(), bound)?
        } else {
            self.first(&KeyRange::prefix(prefix.as_slice()), "join lookup")?
                .map(|(_, value)| value)
        };
        let joined = match joined_key {
            Some(key) => self.fetch_row(&key)?,
            None => return Ok(false),
        };

        for &index in &join.fields_from_join {
            let field = join_table.field(index);
            let mut src = field_input(field, &joined)?;
            field.key_type.copy_value(&mut src, row)?;
        }
        Ok(true)
    }

    fn fetch_row(&self, key: &[u8]) -> ExecutorResult<Vec<u8>> {
        self.store
            .get(key)
            .map_err(|e| ExecutorError::store_io("row read", e))?
            .ok_or_else(|| ExecutorError::dangling_reference(key))
    }

    fn first(&self, range: &KeyRange, context: &str) -> ExecutorResult<Option<(Vec<u8>, Vec<u8>)>> {
        self.store
            .first_in(range)
            .map_err(|e| ExecutorError::store_io(context, e))
    }
}

/// Input positioned at `field` within a native row encoding
fn field_input<'r>(field: &Field, row: &'r [u8]) -> ExecutorResult<InputBuffer<'r>> {
    let position = field
        .byte_position
        .ok_or_else(|| ExecutorError::unpositioned_field(&field.name))?;
    let end = position as usize + field.key_type.fixed_size().unwrap_or(0) as usize;
    if end > row.len() {
        return Err(ExecutorError::out_of_range_field(&field.name, position, row.len()));
    }
    Ok(InputBuffer::new(&row[position as usize..]))
}

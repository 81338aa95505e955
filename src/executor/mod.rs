//! Query Executor subsystem
//!
//! Executes named range/prefix queries against an ordered store. Each call
//! is a pure function of the request, the caller's head block, the
//! prepared registry and the store's contents; nothing persists between
//! calls.
//!
//! # Wire format
//!
//! Requests carry the query name, an optional block bound, the range-key
//! arguments and a result cap. Responses are a `varuint32` count followed
//! by length-prefixed row blobs.

mod errors;
mod executor;
mod request;
mod result;
mod session;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, Severity};
pub use executor::QueryExecutor;
pub use request::{peek_query_name, QueryRequest, RequestBuilder};
pub use result::{decode_rows, encode_rows, ExecutionResult};
pub use session::QuerySession;

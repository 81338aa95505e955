//! histql - point-in-time queries over blockchain history
//!
//! An order-preserving key codec, the keyspace built from it, a schema
//! registry prepared once at startup, and a query executor that answers
//! "as of block N" range queries with an optional join hop.

pub mod cli;
pub mod codec;
pub mod executor;
pub mod keyspace;
pub mod metadata;
pub mod observability;
pub mod schema;
pub mod store;

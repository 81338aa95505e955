//! Key Codec subsystem
//!
//! Order-preserving encoding for the primitive kinds that may appear in
//! store keys, plus native-layout value copying for everything else.
//!
//! # Ordering
//!
//! For every supported key type, byte-wise comparison of two encodings
//! equals comparison of the values they encode. Fixed-width unsigned
//! values, symbols, 128-bit integers and 256-bit hashes are written with
//! their native little-endian bytes reversed.

mod buffer;
mod errors;
mod key;
mod kv_type;
mod symbol;

pub use buffer::{write_varuint32, InputBuffer, KeyBuffer};
pub use errors::{CodecError, CodecResult};
pub use key::{decode_key, encode_key, lower_bound_suffix, upper_bound_suffix, KeyCodec};
pub use kv_type::{KeyType, TypeRegistry};
pub use symbol::{Checksum256, Symbol};

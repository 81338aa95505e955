//! Growable key buffer and a cursor over serialized input
//!
//! `KeyBuffer` is owned by a single key-building call. Its `reversed`
//! operation runs a writer and then flips only the bytes that writer
//! appended, which is how little-endian native values become
//! big-endian sort keys.

use super::errors::{CodecError, CodecResult};

/// Append-only byte buffer used to assemble composite keys
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyBuffer {
    bytes: Vec<u8>,
}

impl KeyBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Wraps existing bytes, typically a prefix built elsewhere
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Key bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer, returning the key bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Appends raw bytes
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends a single byte
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Appends `count` copies of `byte`
    pub fn fill(&mut self, count: usize, byte: u8) {
        self.bytes.resize(self.bytes.len() + count, byte);
    }

    /// Runs `write` and reverses whatever it appended.
    ///
    /// Bytes present before the call are left untouched.
    pub fn reversed<R>(&mut self, write: impl FnOnce(&mut Self) -> R) -> R {
        let start = self.bytes.len();
        let out = write(self);
        self.bytes[start..].reverse();
        out
    }
}

impl AsRef<[u8]> for KeyBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<KeyBuffer> for Vec<u8> {
    fn from(buf: KeyBuffer) -> Self {
        buf.bytes
    }
}

/// Forward-only cursor over a serialized byte stream
#[derive(Debug, Clone, Copy)]
pub struct InputBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> InputBuffer<'a> {
    /// Cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current read offset from the start of the stream
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unconsumed tail of the stream
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consumes exactly `count` bytes
    pub fn take(&mut self, count: usize) -> CodecResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::Truncated {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Consumes a fixed-size array
    pub fn take_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads one byte
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Reads a little-endian u32
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian u64
    pub fn read_u64(&mut self) -> CodecResult<u64> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    /// Reads a LEB128 varuint32
    pub fn read_varuint32(&mut self) -> CodecResult<u32> {
        let mut result: u32 = 0;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            let bits = u32::from(byte & 0x7f);
            if shift == 28 && bits > 0x0f {
                return Err(CodecError::MalformedVarUint);
            }
            result |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(CodecError::MalformedVarUint)
    }
}

/// Appends a LEB128 varuint32
pub fn write_varuint32(dest: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            dest.push(byte);
            return;
        }
        dest.push(byte | 0x80);
    }
}

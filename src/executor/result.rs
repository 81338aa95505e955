//! Result types for query execution

use crate::codec::{write_varuint32, CodecResult, InputBuffer};

use super::errors::{ExecutorError, ExecutorResult};

/// Result of query execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Row blobs in index order: native row bytes, then any joined fields
    pub rows: Vec<Vec<u8>>,
    /// Distinct index keys that had a visible revision
    pub matched: usize,
    /// Rows dropped because their join lookup found nothing
    pub join_misses: usize,
}

impl ExecutionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Serializes the rows for the wire
    pub fn encode(&self) -> ExecutorResult<Vec<u8>> {
        encode_rows(&self.rows)
    }
}

/// `varuint32` row count, then each row as `varuint32` length + bytes.
///
/// Fails when the encoding would not fit a 32-bit length field.
pub fn encode_rows(rows: &[Vec<u8>]) -> ExecutorResult<Vec<u8>> {
    let size = encoded_size(rows);
    if size > u32::MAX as usize {
        return Err(ExecutorError::result_too_large(size));
    }
    let mut out = Vec::with_capacity(size);
    write_varuint32(&mut out, rows.len() as u32);
    for row in rows {
        write_varuint32(&mut out, row.len() as u32);
        out.extend_from_slice(row);
    }
    Ok(out)
}

/// Parses an encoded row sequence
pub fn decode_rows(bytes: &[u8]) -> CodecResult<Vec<Vec<u8>>> {
    let mut input = InputBuffer::new(bytes);
    let count = input.read_varuint32()?;
    let mut rows = Vec::with_capacity((count as usize).min(input.remaining()));
    for _ in 0..count {
        let len = input.read_varuint32()? as usize;
        rows.push(input.take(len)?.to_vec());
    }
    Ok(rows)
}

/// Bytes `encode_rows` would produce; saturates rather than overflowing
fn encoded_size(rows: &[Vec<u8>]) -> usize {
    rows.iter().fold(varuint32_len(rows.len()), |total, row| {
        total
            .saturating_add(varuint32_len(row.len()))
            .saturating_add(row.len())
    })
}

fn varuint32_len(value: usize) -> usize {
    let mut len = 1;
    let mut value = value >> 7;
    while value != 0 {
        len += 1;
        value >>= 7;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorErrorCode;

    #[test]
    fn test_encode_layout() {
        let rows = vec![vec![1, 2, 3], vec![], vec![9; 200]];
        let bytes = encode_rows(&rows).unwrap();
        assert_eq!(&bytes[..5], &[3, 3, 1, 2, 3]);
        assert_eq!(bytes[5], 0);
        // 200 needs two varuint32 bytes
        assert_eq!(&bytes[6..8], &[0xc8, 0x01]);
        assert_eq!(bytes.len(), encoded_size(&rows));
        assert_eq!(decode_rows(&bytes).unwrap(), rows);
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(ExecutionResult::empty().encode().unwrap(), vec![0]);
    }

    #[test]
    fn test_size_limit() {
        let err = ExecutorError::result_too_large(encoded_size(&[]) + u32::MAX as usize);
        assert_eq!(err.code(), ExecutorErrorCode::ResultTooLarge);
        assert_eq!(varuint32_len(u32::MAX as usize), 5);
    }

    #[test]
    fn test_truncated_rows() {
        assert!(decode_rows(&[2, 1, 7]).is_err());
    }
}

//! Metadata record layouts
//!
//! Both records use the native little-endian layout the ingestion side
//! writes: fixed-width integers followed by raw 32-byte ids.

use crate::codec::{Checksum256, InputBuffer};

use super::errors::{MetadataError, MetadataResult};

/// Ingestion progress, stored under the fill-status key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStatus {
    pub head: u32,
    pub head_id: Checksum256,
    pub irreversible: u32,
    pub irreversible_id: Checksum256,
    pub first: u32,
}

impl FillStatus {
    pub const ENCODED_LEN: usize = 4 + 32 + 4 + 32 + 4;

    /// Native little-endian encoding
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        out.extend_from_slice(&self.head.to_le_bytes());
        out.extend_from_slice(self.head_id.as_bytes());
        out.extend_from_slice(&self.irreversible.to_le_bytes());
        out.extend_from_slice(self.irreversible_id.as_bytes());
        out.extend_from_slice(&self.first.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> MetadataResult<Self> {
        let record = "fill_status";
        let malformed = |source| MetadataError::Malformed { record, source };
        let mut input = InputBuffer::new(bytes);
        let status = Self {
            head: input.read_u32().map_err(malformed)?,
            head_id: Checksum256::new(input.take_array().map_err(malformed)?),
            irreversible: input.read_u32().map_err(malformed)?,
            irreversible_id: Checksum256::new(input.take_array().map_err(malformed)?),
            first: input.read_u32().map_err(malformed)?,
        };
        ensure_consumed(record, &input)?;
        Ok(status)
    }
}

/// A block the ingestion side has recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceivedBlock {
    pub block_num: u32,
    pub block_id: Checksum256,
}

impl ReceivedBlock {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(36);
        out.extend_from_slice(&self.block_num.to_le_bytes());
        out.extend_from_slice(self.block_id.as_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> MetadataResult<Self> {
        let record = "received_block";
        let malformed = |source| MetadataError::Malformed { record, source };
        let mut input = InputBuffer::new(bytes);
        let block = Self {
            block_num: input.read_u32().map_err(malformed)?,
            block_id: Checksum256::new(input.take_array().map_err(malformed)?),
        };
        ensure_consumed(record, &input)?;
        Ok(block)
    }
}

fn ensure_consumed(record: &'static str, input: &InputBuffer<'_>) -> MetadataResult<()> {
    if input.is_empty() {
        Ok(())
    } else {
        Err(MetadataError::TrailingBytes {
            record,
            extra: input.remaining(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_status_layout() {
        let status = FillStatus {
            head: 0x0102_0304,
            head_id: Checksum256::new([0xaa; 32]),
            irreversible: 90,
            irreversible_id: Checksum256::new([0xbb; 32]),
            first: 2,
        };
        let bytes = status.to_bytes();
        assert_eq!(bytes.len(), FillStatus::ENCODED_LEN);
        assert_eq!(&bytes[..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(FillStatus::from_bytes(&bytes).unwrap(), status);
    }

    #[test]
    fn test_truncated_received_block() {
        let err = ReceivedBlock::from_bytes(&[1, 0, 0, 0, 9]).unwrap_err();
        assert_eq!(err.code(), "HQL_KEY_DECODE");
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = ReceivedBlock::default().to_bytes();
        bytes.push(0);
        assert!(matches!(
            ReceivedBlock::from_bytes(&bytes),
            Err(MetadataError::TrailingBytes { extra: 1, .. })
        ));
    }
}

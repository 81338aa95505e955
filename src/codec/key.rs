//! Typed order-preserving key encoding
//!
//! Only types whose byte-wise order can match their value order implement
//! [`KeyCodec`]: unsigned integers, symbols, 128-bit integers, 256-bit
//! hashes, and `bool` (reserved for the present/tombstone flag). The key
//! form is the little-endian native form written through
//! [`KeyBuffer::reversed`].

use super::buffer::{InputBuffer, KeyBuffer};
use super::errors::CodecResult;
use super::symbol::{Checksum256, Symbol};

/// A value with an order-preserving fixed-width key form
pub trait KeyCodec: Sized {
    /// Encoded width in bytes
    const SIZE: usize;

    /// Appends the key form of `self`
    fn append_key(&self, dest: &mut KeyBuffer);

    /// Reads one key-form value
    fn read_key(input: &mut InputBuffer<'_>) -> CodecResult<Self>;
}

macro_rules! impl_unsigned_key {
    ($($t:ty),*) => {
        $(
            impl KeyCodec for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn append_key(&self, dest: &mut KeyBuffer) {
                    dest.reversed(|buf| buf.append(&self.to_le_bytes()));
                }

                fn read_key(input: &mut InputBuffer<'_>) -> CodecResult<Self> {
                    let mut raw: [u8; std::mem::size_of::<$t>()] = input.take_array()?;
                    raw.reverse();
                    Ok(<$t>::from_le_bytes(raw))
                }
            }
        )*
    };
}

impl_unsigned_key!(u8, u16, u32, u64, u128);

impl KeyCodec for bool {
    const SIZE: usize = 1;

    fn append_key(&self, dest: &mut KeyBuffer) {
        dest.push(u8::from(*self));
    }

    fn read_key(input: &mut InputBuffer<'_>) -> CodecResult<Self> {
        Ok(input.read_u8()? != 0)
    }
}

impl KeyCodec for Symbol {
    const SIZE: usize = 8;

    fn append_key(&self, dest: &mut KeyBuffer) {
        self.value().append_key(dest);
    }

    fn read_key(input: &mut InputBuffer<'_>) -> CodecResult<Self> {
        Ok(Symbol::new(u64::read_key(input)?))
    }
}

impl KeyCodec for Checksum256 {
    const SIZE: usize = 32;

    fn append_key(&self, dest: &mut KeyBuffer) {
        dest.reversed(|buf| buf.append(self.as_bytes()));
    }

    fn read_key(input: &mut InputBuffer<'_>) -> CodecResult<Self> {
        let mut raw: [u8; 32] = input.take_array()?;
        raw.reverse();
        Ok(Checksum256::new(raw))
    }
}

/// Encodes a single value into its key form
pub fn encode_key<T: KeyCodec>(value: &T) -> Vec<u8> {
    let mut buf = KeyBuffer::with_capacity(T::SIZE);
    value.append_key(&mut buf);
    buf.into_vec()
}

/// Decodes a single key-form value from the front of `bytes`
pub fn decode_key<T: KeyCodec>(bytes: &[u8]) -> CodecResult<T> {
    T::read_key(&mut InputBuffer::new(bytes))
}

/// Zero-filled completion of a partial key (inclusive lower bound)
pub fn lower_bound_suffix<T: KeyCodec>() -> Vec<u8> {
    vec![0x00; T::SIZE]
}

/// 0xFF-filled completion of a partial key (upper bound)
pub fn upper_bound_suffix<T: KeyCodec>() -> Vec<u8> {
    vec![0xff; T::SIZE]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    #[test]
    fn test_u32_is_big_endian() {
        assert_eq!(encode_key(&0x0102_0304u32), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_round_trip_extremes() {
        for v in [0u64, 1, 255, 256, u64::MAX] {
            assert_eq!(decode_key::<u64>(&encode_key(&v)).unwrap(), v);
        }
        for v in [0u128, 1, u128::MAX] {
            assert_eq!(decode_key::<u128>(&encode_key(&v)).unwrap(), v);
        }
        for v in [0u8, 0x7f, 0xff] {
            assert_eq!(decode_key::<u8>(&encode_key(&v)).unwrap(), v);
        }
    }

    #[test]
    fn test_order_preserved_across_byte_boundary() {
        assert!(encode_key(&255u16) < encode_key(&256u16));
        assert!(encode_key(&0x00ff_ffffu32) < encode_key(&0x0100_0000u32));
    }

    #[test]
    fn test_checksum_reversed() {
        let mut bytes = [0u8; 32];
        bytes[31] = 9;
        let key = encode_key(&Checksum256::new(bytes));
        assert_eq!(key[0], 9);
        assert_eq!(decode_key::<Checksum256>(&key).unwrap(), Checksum256::new(bytes));
    }

    #[test]
    fn test_decode_short_input() {
        let err = decode_key::<u32>(&[1, 2]).unwrap_err();
        assert_eq!(err, CodecError::Truncated { needed: 4, remaining: 2 });
    }

    #[test]
    fn test_bound_suffixes() {
        assert_eq!(lower_bound_suffix::<u32>(), vec![0; 4]);
        assert_eq!(upper_bound_suffix::<Symbol>(), vec![0xff; 8]);
    }
}

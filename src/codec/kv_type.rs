//! Declared field types and their codec capabilities
//!
//! Each schema field type resolves once, at preparation, to a [`KeyType`]
//! variant. The variant answers every codec question for that field:
//! whether and how it forms a sort key, how its native row encoding is
//! copied, and its fixed width for row layout planning.

use std::collections::HashMap;

use super::buffer::{write_varuint32, InputBuffer, KeyBuffer};
use super::errors::{CodecError, CodecResult};

/// Closed set of field types a schema can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Bool,
    VarUint32,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Float64,
    Float128,
    Name,
    String,
    TimePoint,
    TimePointSec,
    BlockTimestamp,
    Checksum256,
    PublicKey,
    Bytes,
    TransactionStatus,
}

/// Width of a compressed elliptic-curve public key
const PUBLIC_KEY_DATA_SIZE: usize = 33;

impl KeyType {
    /// Canonical declared type name
    pub fn name(&self) -> &'static str {
        match self {
            KeyType::Bool => "bool",
            KeyType::VarUint32 => "varuint32",
            KeyType::Uint8 => "uint8",
            KeyType::Uint16 => "uint16",
            KeyType::Uint32 => "uint32",
            KeyType::Uint64 => "uint64",
            KeyType::Uint128 => "uint128",
            KeyType::Int8 => "int8",
            KeyType::Int16 => "int16",
            KeyType::Int32 => "int32",
            KeyType::Int64 => "int64",
            KeyType::Int128 => "int128",
            KeyType::Float64 => "float64",
            KeyType::Float128 => "float128",
            KeyType::Name => "name",
            KeyType::String => "string",
            KeyType::TimePoint => "time_point",
            KeyType::TimePointSec => "time_point_sec",
            KeyType::BlockTimestamp => "block_timestamp_type",
            KeyType::Checksum256 => "checksum256",
            KeyType::PublicKey => "public_key",
            KeyType::Bytes => "bytes",
            KeyType::TransactionStatus => "transaction_status",
        }
    }

    /// Width of the native row encoding, `None` when it varies per value
    pub fn fixed_size(&self) -> Option<u32> {
        match self {
            KeyType::Bool | KeyType::Uint8 | KeyType::Int8 | KeyType::TransactionStatus => Some(1),
            KeyType::Uint16 | KeyType::Int16 => Some(2),
            KeyType::Uint32 | KeyType::Int32 | KeyType::TimePointSec | KeyType::BlockTimestamp => {
                Some(4)
            }
            KeyType::Uint64
            | KeyType::Int64
            | KeyType::Float64
            | KeyType::Name
            | KeyType::TimePoint => Some(8),
            KeyType::Uint128 | KeyType::Int128 | KeyType::Float128 => Some(16),
            KeyType::Checksum256 => Some(32),
            KeyType::VarUint32 | KeyType::String | KeyType::PublicKey | KeyType::Bytes => None,
        }
    }

    /// Width of the key form, `None` for types that cannot be keys
    pub fn key_size(&self) -> Option<usize> {
        match self {
            KeyType::Uint8 => Some(1),
            KeyType::Uint16 => Some(2),
            KeyType::Uint32 | KeyType::VarUint32 => Some(4),
            KeyType::Uint64 | KeyType::Name => Some(8),
            KeyType::Uint128 => Some(16),
            KeyType::Checksum256 => Some(32),
            _ => None,
        }
    }

    /// Whether values of this type can appear in a sort key
    pub fn is_key_type(&self) -> bool {
        self.key_size().is_some()
    }

    fn require_key_size(&self) -> CodecResult<usize> {
        self.key_size()
            .ok_or(CodecError::UnsupportedKeyType(self.name()))
    }

    /// Reads one value in native row encoding and appends its key form.
    ///
    /// A varuint32 is widened to a fixed u32 so every encoding of the same
    /// number sorts identically.
    pub fn row_to_key(&self, src: &mut InputBuffer<'_>, dest: &mut KeyBuffer) -> CodecResult<()> {
        let size = self.require_key_size()?;
        if *self == KeyType::VarUint32 {
            let value = src.read_varuint32()?;
            dest.reversed(|buf| buf.append(&value.to_le_bytes()));
            return Ok(());
        }
        let raw = src.take(size)?;
        dest.reversed(|buf| buf.append(raw));
        Ok(())
    }

    /// Reads one query argument and appends its key form.
    ///
    /// Query arguments are fixed width: a varuint32 argument arrives as a
    /// plain little-endian u32.
    pub fn query_to_key(&self, src: &mut InputBuffer<'_>, dest: &mut KeyBuffer) -> CodecResult<()> {
        let size = self.require_key_size()?;
        let raw = src.take(size)?;
        dest.reversed(|buf| buf.append(raw));
        Ok(())
    }

    /// Appends the zero-filled lower completion for this key type
    pub fn lower_bound_suffix(&self, dest: &mut KeyBuffer) -> CodecResult<()> {
        let size = self.require_key_size()?;
        dest.fill(size, 0x00);
        Ok(())
    }

    /// Appends the 0xFF-filled upper completion for this key type
    pub fn upper_bound_suffix(&self, dest: &mut KeyBuffer) -> CodecResult<()> {
        let size = self.require_key_size()?;
        dest.fill(size, 0xff);
        Ok(())
    }

    /// Reads one value in native encoding and returns its raw bytes
    pub fn read_value<'a>(&self, src: &mut InputBuffer<'a>) -> CodecResult<&'a [u8]> {
        let start = src.rest();
        let before = src.remaining();
        self.skip_value(src)?;
        Ok(&start[..before - src.remaining()])
    }

    /// Copies one value in native encoding from `src` to `dest`.
    ///
    /// No ordering is implied; the bytes keep their native layout except
    /// that a varuint32 is rewritten in its shortest form.
    pub fn copy_value(&self, src: &mut InputBuffer<'_>, dest: &mut Vec<u8>) -> CodecResult<()> {
        if *self == KeyType::VarUint32 {
            let value = src.read_varuint32()?;
            write_varuint32(dest, value);
            return Ok(());
        }
        dest.extend_from_slice(self.read_value(src)?);
        Ok(())
    }

    fn skip_value(&self, src: &mut InputBuffer<'_>) -> CodecResult<()> {
        if let Some(size) = self.fixed_size() {
            src.take(size as usize)?;
            return Ok(());
        }
        match self {
            KeyType::VarUint32 => {
                src.read_varuint32()?;
            }
            KeyType::String | KeyType::Bytes => {
                let len = src.read_varuint32()?;
                src.take(len as usize)?;
            }
            KeyType::PublicKey => match src.read_u8()? {
                0 | 1 => {
                    src.take(PUBLIC_KEY_DATA_SIZE)?;
                }
                2 => {
                    src.take(PUBLIC_KEY_DATA_SIZE)?;
                    src.read_u8()?;
                    let len = src.read_varuint32()?;
                    src.take(len as usize)?;
                }
                other => return Err(CodecError::UnknownPublicKeyType(other)),
            },
            _ => unreachable!("fixed-size types handled above"),
        }
        Ok(())
    }
}

/// Maps declared type names to codec capabilities
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, KeyType>,
}

impl TypeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Registry covering every built-in type under its canonical name
    pub fn standard() -> Self {
        let all = [
            KeyType::Bool,
            KeyType::VarUint32,
            KeyType::Uint8,
            KeyType::Uint16,
            KeyType::Uint32,
            KeyType::Uint64,
            KeyType::Uint128,
            KeyType::Int8,
            KeyType::Int16,
            KeyType::Int32,
            KeyType::Int64,
            KeyType::Int128,
            KeyType::Float64,
            KeyType::Float128,
            KeyType::Name,
            KeyType::String,
            KeyType::TimePoint,
            KeyType::TimePointSec,
            KeyType::BlockTimestamp,
            KeyType::Checksum256,
            KeyType::PublicKey,
            KeyType::Bytes,
            KeyType::TransactionStatus,
        ];
        all.into_iter()
            .fold(Self::new(), |reg, ty| reg.with(ty.name(), ty))
    }

    /// Adds or replaces a mapping
    pub fn with(mut self, name: impl Into<String>, ty: KeyType) -> Self {
        self.types.insert(name.into(), ty);
        self
    }

    /// Looks up a declared type name
    pub fn get(&self, name: &str) -> Option<KeyType> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

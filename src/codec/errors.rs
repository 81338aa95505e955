//! Codec error types
//!
//! Error codes:
//! - HQL_UNSUPPORTED_KEY_TYPE
//! - HQL_KEY_DECODE
//! - HQL_VALUE_DECODE

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Failures raised while encoding or decoding keys and row values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The type has no order-preserving key form
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(&'static str),

    /// Fewer bytes remain than the value's encoded width
    #[error("key deserialization error: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A varuint32 ran past five bytes or overflowed 32 bits
    #[error("malformed varuint32")]
    MalformedVarUint,

    /// A public key carried a type byte outside the known variants
    #[error("unknown public key type {0}")]
    UnknownPublicKeyType(u8),
}

impl CodecError {
    /// Returns the machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::UnsupportedKeyType(_) => "HQL_UNSUPPORTED_KEY_TYPE",
            CodecError::Truncated { .. } => "HQL_KEY_DECODE",
            CodecError::MalformedVarUint | CodecError::UnknownPublicKeyType(_) => {
                "HQL_VALUE_DECODE"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            CodecError::UnsupportedKeyType("string").code(),
            "HQL_UNSUPPORTED_KEY_TYPE"
        );
        assert_eq!(
            CodecError::Truncated { needed: 4, remaining: 1 }.code(),
            "HQL_KEY_DECODE"
        );
    }

    #[test]
    fn test_truncated_display() {
        let err = CodecError::Truncated { needed: 8, remaining: 3 };
        let text = err.to_string();
        assert!(text.contains("needed 8"));
        assert!(text.contains("3 remaining"));
    }
}

//! Executor error types
//!
//! Error codes:
//! - HQL_UNKNOWN_QUERY (REJECT)
//! - HQL_NOT_IMPLEMENTED (REJECT)
//! - HQL_KEY_DECODE (REJECT)
//! - HQL_UNSUPPORTED_KEY_TYPE (ERROR)
//! - HQL_VALUE_DECODE (ERROR)
//! - HQL_FIELD_OUT_OF_RANGE (ERROR)
//! - HQL_STORE_IO (ERROR)
//! - HQL_DANGLING_REFERENCE (ERROR)
//! - HQL_RESULT_TOO_LARGE (ERROR)

use std::fmt;

use crate::codec::CodecError;
use crate::metadata::MetadataError;
use crate::store::StoreError;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request itself is unacceptable; the store was not touched or
    /// is unaffected
    Reject,
    /// The query could not be completed against stored data
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    UnknownQuery,
    /// Query declares non-range arguments
    NotImplemented,
    /// Request or stored key shorter than a field's width
    KeyDecode,
    UnsupportedKeyType,
    /// Stored row value could not be decoded
    ValueDecode,
    OutOfRangeFieldPosition,
    StoreIo,
    /// Index entry names a row the store does not hold
    DanglingReference,
    ResultTooLarge,
}

impl ExecutorErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::UnknownQuery => "HQL_UNKNOWN_QUERY",
            ExecutorErrorCode::NotImplemented => "HQL_NOT_IMPLEMENTED",
            ExecutorErrorCode::KeyDecode => "HQL_KEY_DECODE",
            ExecutorErrorCode::UnsupportedKeyType => "HQL_UNSUPPORTED_KEY_TYPE",
            ExecutorErrorCode::ValueDecode => "HQL_VALUE_DECODE",
            ExecutorErrorCode::OutOfRangeFieldPosition => "HQL_FIELD_OUT_OF_RANGE",
            ExecutorErrorCode::StoreIo => "HQL_STORE_IO",
            ExecutorErrorCode::DanglingReference => "HQL_DANGLING_REFERENCE",
            ExecutorErrorCode::ResultTooLarge => "HQL_RESULT_TOO_LARGE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ExecutorErrorCode::UnknownQuery
            | ExecutorErrorCode::NotImplemented
            | ExecutorErrorCode::KeyDecode => Severity::Reject,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error with full context
#[derive(Debug)]
pub struct ExecutorError {
    code: ExecutorErrorCode,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ExecutorError {
    fn new(code: ExecutorErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            source: None,
        }
    }

    pub fn unknown_query(name: impl fmt::Display) -> Self {
        Self::new(
            ExecutorErrorCode::UnknownQuery,
            format!("query_database: unknown query: {}", name),
        )
    }

    pub fn not_implemented(name: impl fmt::Display) -> Self {
        Self::new(
            ExecutorErrorCode::NotImplemented,
            format!("query_database: query: {} not implemented", name),
        )
    }

    pub fn out_of_range_field(field: &str, position: u32, len: usize) -> Self {
        Self::new(
            ExecutorErrorCode::OutOfRangeFieldPosition,
            format!(
                "Field '{}' at position {} is out of range for a {} byte row",
                field, position, len
            ),
        )
    }

    pub fn unpositioned_field(field: &str) -> Self {
        Self::new(
            ExecutorErrorCode::OutOfRangeFieldPosition,
            format!("key {} has unknown position", field),
        )
    }

    /// Wraps a store failure with the operation it interrupted
    pub fn store_io(context: &str, source: StoreError) -> Self {
        Self {
            code: ExecutorErrorCode::StoreIo,
            message: format!("query_database: {}: {}", context, source),
            source: Some(Box::new(source)),
        }
    }

    pub fn dangling_reference(key: &[u8]) -> Self {
        Self::new(
            ExecutorErrorCode::DanglingReference,
            format!("Index entry references missing row {}", hex::encode(key)),
        )
    }

    pub fn result_too_large(size: usize) -> Self {
        Self::new(
            ExecutorErrorCode::ResultTooLarge,
            format!("query_database: result is too big ({} bytes)", size),
        )
    }

    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_reject(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ExecutorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<CodecError> for ExecutorError {
    fn from(err: CodecError) -> Self {
        let code = match err {
            CodecError::UnsupportedKeyType(_) => ExecutorErrorCode::UnsupportedKeyType,
            CodecError::Truncated { .. } => ExecutorErrorCode::KeyDecode,
            CodecError::MalformedVarUint | CodecError::UnknownPublicKeyType(_) => {
                ExecutorErrorCode::ValueDecode
            }
        };
        Self {
            code,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<MetadataError> for ExecutorError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Store(source) => ExecutorError::store_io("metadata", source),
            other => Self {
                code: ExecutorErrorCode::ValueDecode,
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

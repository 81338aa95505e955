//! Metadata read errors

use thiserror::Error;

use crate::codec::CodecError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata store read failed: {0}")]
    Store(#[from] StoreError),

    #[error("malformed {record} record: {source}")]
    Malformed {
        record: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("{record} record has {extra} trailing bytes")]
    TrailingBytes { record: &'static str, extra: usize },
}

impl MetadataError {
    pub fn code(&self) -> &'static str {
        match self {
            MetadataError::Store(_) => "HQL_STORE_IO",
            MetadataError::Malformed { .. } | MetadataError::TrailingBytes { .. } => "HQL_KEY_DECODE",
        }
    }
}

pub type MetadataResult<T> = Result<T, MetadataError>;

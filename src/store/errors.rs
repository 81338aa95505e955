//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by an ordered key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing engine rejected a read
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}

//! # Store Errors
//!
//! Errors reported by any [`KeyValueStore`](crate::store::KeyValueStore)
//! implementation, whether the in-process table actor or a test double.

/// Errors that can occur while talking to the store.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Table not found: {0:?}")]
    TableNotFound(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Conditional check failed for key: {0}")]
    ConditionFailed(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

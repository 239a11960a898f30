//! # Key-Value Store
//!
//! The user operations never talk to a concrete backend. They receive a
//! [`KeyValueStore`] and a table name, and everything they persist goes
//! through the four primitives below.
//!
//! ## Layout
//!
//! - [`KeyValueStore`]: the storage capability (get, scan, put, delete).
//! - [`AttributeValue`] / [`Item`]: the store-native record representation.
//! - [`codec`]: serde-based marshalling between records and items.
//! - [`TableActor`] / [`TableClient`]: an in-process store run as a Tokio
//!   actor. The actor owns every table and processes requests sequentially,
//!   so individual point operations are serialized.
//! - [`mock`]: an expectation-driven store for tests.

pub mod actor;
pub mod attribute;
pub mod client;
pub mod codec;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::{TableActor, TableSchema};
pub use attribute::AttributeValue;
pub use client::TableClient;
pub use codec::{marshal_item, unmarshal_item, unmarshal_items, CodecError};
pub use error::StoreError;
pub use message::{Response, StoreRequest};

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// A stored record: attribute name to typed value.
pub type Item = HashMap<String, AttributeValue>;

/// Primary key of a row. Only string partition keys are supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub name: String,
    pub value: String,
}

impl Key {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Precondition evaluated atomically with a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PutCondition {
    /// Overwrite or insert.
    #[default]
    Always,
    /// Only insert when no row has the item's key.
    IfAbsent,
    /// Only overwrite a row that already has the item's key.
    IfPresent,
}

/// The storage capability threaded through every user operation.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Point lookup. `Ok(None)` means no row has this key.
    async fn get_item(&self, table: &str, key: Key) -> Result<Option<Item>, StoreError>;

    /// Full, unfiltered, unpaginated read of the table.
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;

    /// Writes `item`, keyed by the table's key attribute.
    /// A violated `condition` yields [`StoreError::ConditionFailed`].
    async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: PutCondition,
    ) -> Result<(), StoreError>;

    /// Removes the row if present. Deleting an absent key is not an error.
    async fn delete_item(&self, table: &str, key: Key) -> Result<(), StoreError>;
}

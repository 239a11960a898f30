//! # Table Actor
//!
//! The `TableActor` is the server half of the in-process store. It owns every
//! table and the receiving end of the request channel, and processes one
//! [`StoreRequest`] at a time. Because state is owned by a single task no
//! lock guards the rows, and every point operation (including a conditional
//! put) is atomic with respect to the others.
//!
//! # Usage Pattern
//!
//! 1.  **Create**: call [`TableActor::new`] to get the actor and its
//!     [`TableClient`].
//! 2.  **Run**: spawn [`TableActor::run`] in a background task.
//! 3.  **Use**: hand the client (or clones of it) to whatever needs a
//!     [`KeyValueStore`](crate::store::KeyValueStore).
//!
//! ```rust
//! use user_store::store::{Key, KeyValueStore, TableActor, TableSchema};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TableActor::new(8, [TableSchema::new("users", "email")]);
//!     tokio::spawn(actor.run());
//!
//!     let found = client.get_item("users", Key::new("email", "a@b.co")).await.unwrap();
//!     assert!(found.is_none());
//! }
//! ```
//!
//! The actor exits once every client has been dropped.

use crate::store::{Item, Key, PutCondition, StoreError, StoreRequest, TableClient};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Name and key attribute of a table served by the actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub key_attribute: String,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_attribute: key_attribute.into(),
        }
    }
}

#[derive(Debug)]
struct Table {
    key_attribute: String,
    // BTreeMap keeps scans ordered by key.
    rows: BTreeMap<String, Item>,
}

impl Table {
    fn check_key(&self, key: &Key) -> Result<(), StoreError> {
        if key.name != self.key_attribute {
            return Err(StoreError::InvalidKey(format!(
                "expected key attribute {:?}, got {:?}",
                self.key_attribute, key.name
            )));
        }
        if key.value.is_empty() {
            return Err(StoreError::InvalidKey(format!(
                "empty value for key attribute {:?}",
                self.key_attribute
            )));
        }
        Ok(())
    }

    fn get(&self, key: &Key) -> Result<Option<Item>, StoreError> {
        self.check_key(key)?;
        Ok(self.rows.get(&key.value).cloned())
    }

    fn scan(&self) -> Vec<Item> {
        self.rows.values().cloned().collect()
    }

    fn put(&mut self, item: Item, condition: PutCondition) -> Result<(), StoreError> {
        let key = item
            .get(&self.key_attribute)
            .and_then(|v| v.as_s())
            .filter(|v| !v.is_empty())
            .map(|v| Key::new(self.key_attribute.clone(), v))
            .ok_or_else(|| {
                StoreError::InvalidKey(format!(
                    "item has no string attribute {:?}",
                    self.key_attribute
                ))
            })?;

        let exists = self.rows.contains_key(&key.value);
        match condition {
            PutCondition::IfAbsent if exists => {
                return Err(StoreError::ConditionFailed(key.to_string()))
            }
            PutCondition::IfPresent if !exists => {
                return Err(StoreError::ConditionFailed(key.to_string()))
            }
            _ => {}
        }
        self.rows.insert(key.value, item);
        Ok(())
    }

    fn delete(&mut self, key: &Key) -> Result<(), StoreError> {
        self.check_key(key)?;
        self.rows.remove(&key.value);
        Ok(())
    }
}

/// The actor that owns the tables of the in-process store.
pub struct TableActor {
    receiver: mpsc::Receiver<StoreRequest>,
    tables: HashMap<String, Table>,
}

impl TableActor {
    /// Creates a new `TableActor` serving `tables`, and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full,
    ///   client calls wait for space.
    /// * `tables` - Schemas of the tables to create, all initially empty.
    pub fn new(
        buffer_size: usize,
        tables: impl IntoIterator<Item = TableSchema>,
    ) -> (Self, TableClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let tables = tables
            .into_iter()
            .map(|schema| {
                let table = Table {
                    key_attribute: schema.key_attribute,
                    rows: BTreeMap::new(),
                };
                (schema.name, table)
            })
            .collect();
        let actor = Self { receiver, tables };
        (actor, TableClient::new(sender))
    }

    fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    fn row_count(&self) -> usize {
        self.tables.values().map(|t| t.rows.len()).sum()
    }

    /// Runs the actor's event loop, processing requests until the channel closes.
    pub async fn run(mut self) {
        info!(tables = self.tables.len(), "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get {
                    table,
                    key,
                    respond_to,
                } => {
                    let result = self.table(&table).and_then(|t| t.get(&key));
                    match &result {
                        Ok(item) => debug!(%table, %key, found = item.is_some(), "Get"),
                        Err(e) => warn!(%table, %key, error = %e, "Get failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Scan { table, respond_to } => {
                    let result = self.table(&table).map(Table::scan);
                    match &result {
                        Ok(items) => debug!(%table, count = items.len(), "Scan"),
                        Err(e) => warn!(%table, error = %e, "Scan failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Put {
                    table,
                    item,
                    condition,
                    respond_to,
                } => {
                    let result = self
                        .table_mut(&table)
                        .and_then(|t| t.put(item, condition));
                    match &result {
                        Ok(()) => debug!(%table, ?condition, "Put"),
                        Err(e) => warn!(%table, ?condition, error = %e, "Put failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete {
                    table,
                    key,
                    respond_to,
                } => {
                    let result = self.table_mut(&table).and_then(|t| t.delete(&key));
                    match &result {
                        Ok(()) => debug!(%table, %key, "Delete"),
                        Err(e) => warn!(%table, %key, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(rows = self.row_count(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{AttributeValue, KeyValueStore};

    fn row(email: &str, first_name: &str) -> Item {
        Item::from([
            ("email".to_string(), AttributeValue::from(email)),
            ("firstName".to_string(), AttributeValue::from(first_name)),
        ])
    }

    fn spawn_store() -> TableClient {
        let (actor, client) = TableActor::new(10, [TableSchema::new("users", "email")]);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_put_get_scan_delete() {
        let client = spawn_store();
        let key = Key::new("email", "b@x.io");

        client
            .put_item("users", row("b@x.io", "B"), PutCondition::Always)
            .await
            .unwrap();
        client
            .put_item("users", row("a@x.io", "A"), PutCondition::Always)
            .await
            .unwrap();

        let found = client.get_item("users", key.clone()).await.unwrap();
        assert_eq!(found, Some(row("b@x.io", "B")));

        // Scan is ordered by key
        let all = client.scan("users").await.unwrap();
        assert_eq!(all, vec![row("a@x.io", "A"), row("b@x.io", "B")]);

        client.delete_item("users", key.clone()).await.unwrap();
        assert_eq!(client.get_item("users", key.clone()).await.unwrap(), None);

        // Deleting again is fine
        client.delete_item("users", key).await.unwrap();
    }

    #[tokio::test]
    async fn test_unconditional_put_overwrites() {
        let client = spawn_store();
        for name in ["A", "Z"] {
            client
                .put_item("users", row("a@x.io", name), PutCondition::Always)
                .await
                .unwrap();
        }
        let all = client.scan("users").await.unwrap();
        assert_eq!(all, vec![row("a@x.io", "Z")]);
    }

    #[tokio::test]
    async fn test_put_conditions() {
        let client = spawn_store();

        let err = client
            .put_item("users", row("a@x.io", "A"), PutCondition::IfPresent)
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::ConditionFailed("email=a@x.io".into()));

        client
            .put_item("users", row("a@x.io", "A"), PutCondition::IfAbsent)
            .await
            .unwrap();

        let err = client
            .put_item("users", row("a@x.io", "B"), PutCondition::IfAbsent)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConditionFailed(_)));

        client
            .put_item("users", row("a@x.io", "C"), PutCondition::IfPresent)
            .await
            .unwrap();
        let found = client.get_item("users", Key::new("email", "a@x.io")).await.unwrap();
        assert_eq!(found, Some(row("a@x.io", "C")));
    }

    #[tokio::test]
    async fn test_unknown_or_empty_table_is_rejected() {
        let client = spawn_store();
        let err = client
            .delete_item("", Key::new("email", "a@x.io"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::TableNotFound(String::new()));

        let err = client.scan("orders").await.unwrap_err();
        assert_eq!(err, StoreError::TableNotFound("orders".into()));
    }

    #[tokio::test]
    async fn test_bad_keys_are_rejected() {
        let client = spawn_store();

        let err = client.get_item("users", Key::new("id", "1")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));

        let err = client.delete_item("users", Key::new("email", "")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));

        let mut keyless = row("", "A");
        let err = client
            .put_item("users", keyless.clone(), PutCondition::Always)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));

        keyless.insert("email".into(), AttributeValue::N("7".into()));
        let err = client
            .put_item("users", keyless, PutCondition::Always)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_closed_store_reports_error() {
        let (actor, client) = TableActor::new(1, [TableSchema::new("users", "email")]);
        drop(actor);
        let err = client.scan("users").await.unwrap_err();
        assert_eq!(err, StoreError::StoreClosed);
    }
}

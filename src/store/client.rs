//! # Table Client
//!
//! The cloneable sending half of the in-process store.

use crate::store::{Item, Key, KeyValueStore, PutCondition, StoreError, StoreRequest};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::instrument;

/// Client for the [`TableActor`](crate::store::TableActor).
///
/// Holds only a channel sender, so clones are cheap and can be shared across
/// request tasks. Every call forwards one [`StoreRequest`] and awaits the
/// actor's reply on a one-shot channel.
#[derive(Clone)]
pub struct TableClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl TableClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}

#[async_trait]
impl KeyValueStore for TableClient {
    #[instrument(skip(self))]
    async fn get_item(&self, table: &str, key: Key) -> Result<Option<Item>, StoreError> {
        let table = table.to_string();
        self.request(|respond_to| StoreRequest::Get {
            table,
            key,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let table = table.to_string();
        self.request(|respond_to| StoreRequest::Scan { table, respond_to })
            .await
    }

    #[instrument(skip(self, item))]
    async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: PutCondition,
    ) -> Result<(), StoreError> {
        let table = table.to_string();
        self.request(|respond_to| StoreRequest::Put {
            table,
            item,
            condition,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, table: &str, key: Key) -> Result<(), StoreError> {
        let table = table.to_string();
        self.request(|respond_to| StoreRequest::Delete {
            table,
            key,
            respond_to,
        })
        .await
    }
}

//! # Store Messages
//!
//! Requests sent from a [`TableClient`](crate::store::TableClient) to the
//! [`TableActor`](crate::store::TableActor). Each variant maps to one
//! [`KeyValueStore`](crate::store::KeyValueStore) primitive and carries a
//! one-shot channel for the reply.

use crate::store::{Item, Key, PutCondition, StoreError};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    Get {
        table: String,
        key: Key,
        respond_to: Response<Option<Item>>,
    },
    Scan {
        table: String,
        respond_to: Response<Vec<Item>>,
    },
    Put {
        table: String,
        item: Item,
        condition: PutCondition,
        respond_to: Response<()>,
    },
    Delete {
        table: String,
        key: Key,
        respond_to: Response<()>,
    },
}

//! # Mock Store
//!
//! A scripted [`KeyValueStore`] for testing code that consumes the store
//! without spinning up a [`TableActor`](crate::store::TableActor).
//!
//! Queue the responses you want with the `expect_*` builders, in the order
//! the calls will happen, then hand `&mock` to the code under test. A call
//! that does not match the next expectation panics. Every call is recorded
//! so the test can assert on what reached the store.
//!
//! # Example
//! ```
//! use user_store::store::mock::{MockStore, StoreCall};
//! use user_store::store::{Key, KeyValueStore, StoreError};
//!
//! # #[tokio::main] async fn main() {
//! let mock = MockStore::new();
//! mock.expect_get().return_ok(None);
//! mock.expect_delete().return_err(StoreError::Backend("throttled".into()));
//!
//! assert_eq!(mock.get_item("users", Key::new("email", "a@b.co")).await, Ok(None));
//! assert!(mock.delete_item("users", Key::new("email", "a@b.co")).await.is_err());
//!
//! assert!(matches!(&mock.calls()[1], StoreCall::Delete { table, .. } if table == "users"));
//! mock.verify(); // Ensures all expectations were met
//! # }
//! ```

use crate::store::{Item, Key, KeyValueStore, PutCondition, StoreError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call received by the mock, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get {
        table: String,
        key: Key,
    },
    Scan {
        table: String,
    },
    Put {
        table: String,
        item: Item,
        condition: PutCondition,
    },
    Delete {
        table: String,
        key: Key,
    },
}

impl StoreCall {
    /// Returns `true` for calls that modify the store.
    pub fn is_write(&self) -> bool {
        matches!(self, StoreCall::Put { .. } | StoreCall::Delete { .. })
    }
}

/// A queued response to the next store call.
enum Expectation {
    Get(Result<Option<Item>, StoreError>),
    Scan(Result<Vec<Item>, StoreError>),
    Put(Result<(), StoreError>),
    Delete(Result<(), StoreError>),
}

impl Expectation {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get_item",
            Expectation::Scan(_) => "scan",
            Expectation::Put(_) => "put_item",
            Expectation::Delete(_) => "delete_item",
        }
    }
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A mock store with expectation tracking for fluent testing.
#[derive(Default)]
pub struct MockStore {
    expectations: Queue,
    calls: Mutex<Vec<StoreCall>>,
}

impl MockStore {
    /// Creates a new mock store with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `get_item` call.
    pub fn expect_get(&self) -> ExpectationBuilder<Option<Item>> {
        self.builder(Expectation::Get)
    }

    /// Expects a `scan` call.
    pub fn expect_scan(&self) -> ExpectationBuilder<Vec<Item>> {
        self.builder(Expectation::Scan)
    }

    /// Expects a `put_item` call.
    pub fn expect_put(&self) -> ExpectationBuilder<()> {
        self.builder(Expectation::Put)
    }

    /// Expects a `delete_item` call.
    pub fn expect_delete(&self) -> ExpectationBuilder<()> {
        self.builder(Expectation::Delete)
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().expect("mock expectations poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<T>(&self, wrap: fn(Result<T, StoreError>) -> Expectation) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    fn next(&self, call: StoreCall) -> Expectation {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(call.clone());
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected store call: {call:?}"))
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder<T> {
    wrap: fn(Result<T, StoreError>) -> Expectation,
    expectations: Queue,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, StoreError>) {
        let mut exps = self.expectations.lock().expect("mock expectations poisoned");
        exps.push_back((self.wrap)(response));
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn get_item(&self, table: &str, key: Key) -> Result<Option<Item>, StoreError> {
        let call = StoreCall::Get {
            table: table.to_string(),
            key,
        };
        match self.next(call) {
            Expectation::Get(response) => response,
            other => panic!("Expected {}, got get_item", other.name()),
        }
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let call = StoreCall::Scan {
            table: table.to_string(),
        };
        match self.next(call) {
            Expectation::Scan(response) => response,
            other => panic!("Expected {}, got scan", other.name()),
        }
    }

    async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: PutCondition,
    ) -> Result<(), StoreError> {
        let call = StoreCall::Put {
            table: table.to_string(),
            item,
            condition,
        };
        match self.next(call) {
            Expectation::Put(response) => response,
            other => panic!("Expected {}, got put_item", other.name()),
        }
    }

    async fn delete_item(&self, table: &str, key: Key) -> Result<(), StoreError> {
        let call = StoreCall::Delete {
            table: table.to_string(),
            key,
        };
        match self.next(call) {
            Expectation::Delete(response) => response,
            other => panic!("Expected {}, got delete_item", other.name()),
        }
    }
}

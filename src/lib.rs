//! # User Store
//!
//! CRUD access to a `User` resource kept in a key-value table, driven by
//! HTTP-method-dispatched request/response calls.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Resource ([`users`], [`model`], [`validators`])
//! The only part of the crate that makes decisions.
//! - **Role**: request decoding, email validation, existence preconditions,
//!   and a closed error taxonomy ([`UserError`](users::UserError)).
//! - **Key items**: [`create_user`](users::create_user),
//!   [`update_user`](users::update_user), [`fetch_user`](users::fetch_user),
//!   [`fetch_users`](users::fetch_users), [`delete_user`](users::delete_user).
//!
//! ### 2. The Storage Seam ([`store`])
//! User operations receive the store as an explicit
//! [`KeyValueStore`](store::KeyValueStore) parameter, never a global client.
//! - **Role**: the get/scan/put/delete contract, the typed item model and the
//!   serde codec between records and items.
//! - **Implementations**: [`TableClient`](store::TableClient), a handle to an
//!   in-process table actor, and [`MockStore`](store::mock::MockStore) for tests.
//!
//! ### 3. The Shell ([`handlers`], [`lifecycle`], [`config`])
//! Plumbing around the resource.
//! - **Role**: API-Gateway-style request/response envelopes and method routing,
//!   store startup and shutdown, layered configuration, tracing setup.
//!
//! ## Concurrency
//!
//! User operations are stateless and may run concurrently. The table actor
//! serializes point operations. Create and update end with a conditional put,
//! so two racing creates for one email produce one user and one
//! `UserAlreadyExists`.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run with info logs, one JSON request per stdin line
//! RUST_LOG=info cargo run < requests.jsonl
//!
//! # Run the tests
//! cargo test
//! ```

pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod model;
pub mod store;
pub mod users;
pub mod validators;

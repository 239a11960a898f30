//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate. Logs go to stderr so that stdout carries only responses.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: startup with the table count, shutdown with the row count
//! - **Store Operations**: Get, Scan, Put (with its condition) and Delete at `debug`,
//!   failures at `warn`
//! - **User Operations**: one span per call (`create_user{table="users"}`), the
//!   outcome at `info`, swallowed existence-check failures at `warn`
//! - **Dispatch**: a `handle{method="POST"}` span wrapping each request
//!
//! ## Usage Examples
//!
//! ```bash
//! # Default level is info
//! cargo run < requests.jsonl
//!
//! # Show every store call
//! RUST_LOG=debug cargo run < requests.jsonl
//!
//! # Only the store actor
//! RUST_LOG=user_store::store=debug cargo run < requests.jsonl
//! ```
//!
//! **With `RUST_LOG=debug`** a create looks like:
//!
//! ```text
//! DEBUG handle:create_user:fetch_user:get_item: Get table="users" key=email=a@b.co found=false
//! DEBUG handle:create_user:fetch_user: Fetched found=false
//! DEBUG handle:create_user:put_item: Put table="users" condition=IfAbsent
//!  INFO handle:create_user: Created email=a@b.co
//! DEBUG handle: Responded status=201
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Span names already say where a line comes from
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

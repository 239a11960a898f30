//! # System Lifecycle
//!
//! Starting, wiring and shutting down the pieces of a running service.
//!
//! - [`UserSystem`] spawns the [`TableActor`](crate::store::TableActor) for
//!   the configured users table and hands out its client.
//! - [`setup_tracing`] installs the log subscriber.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the store channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs final state** and its task completes
//! 4. **Await completion** - [`UserSystem::shutdown`] joins the task

pub mod tracing;
pub mod user_system;

pub use self::tracing::*;
pub use user_system::*;

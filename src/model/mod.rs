//! Pure data structures exchanged with callers and persisted in the store.

pub mod user;

pub use user::*;

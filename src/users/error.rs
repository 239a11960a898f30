//! Error types for the user operations.

use thiserror::Error;

/// Errors that can occur during user operations.
///
/// Each variant is a distinct failure class so the dispatch shell can pick a
/// status code by matching on it. The `Display` text is the message sent back
/// to clients.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum UserError {
    /// The request body did not decode as a user.
    #[error("invalid user data")]
    InvalidUserData,

    /// The email failed syntax validation (create only).
    #[error("invalid email")]
    InvalidEmail,

    /// A user with the same email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// No user with this email exists.
    #[error("user does not exist")]
    UserDoesNotExist,

    /// A store read failed.
    #[error("failed to fetch record")]
    FetchFailed,

    /// A stored record could not be decoded.
    #[error("failed to unmarshal record")]
    UnmarshalFailed,

    /// The record could not be encoded for storage.
    #[error("could not marshal item")]
    MarshalFailed,

    /// A store write failed.
    #[error("could not put item")]
    PutFailed,

    /// A store delete failed.
    #[error("could not delete item")]
    DeleteFailed,
}

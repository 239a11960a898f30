//! # User Resource
//!
//! Fetch, list, create, update and delete users in a key-value table.
//!
//! Every operation takes the table name and the [`KeyValueStore`] to use;
//! nothing is kept between calls. Failures come back as a [`UserError`]
//! variant and the underlying store or codec error is logged.
//!
//! ## Existence preconditions
//!
//! Create rejects an email that is already present, update rejects one that
//! is not. Both read the current record first and then write with a
//! conditional put ([`PutCondition::IfAbsent`] / [`PutCondition::IfPresent`]).
//! Only the conditional put is atomic. A failing read is logged and does not
//! stop the operation; the conditional put still decides.
//!
//! Delete has no precondition.

pub mod error;

pub use error::*;

use crate::model::User;
use crate::store::{
    marshal_item, unmarshal_item, unmarshal_items, Key, KeyValueStore, PutCondition, StoreError,
};
use crate::validators::is_email_valid;
use tracing::{debug, info, instrument, warn};

/// Looks up one user by email.
///
/// Returns `Ok(None)` when no record exists. A record that decodes with an
/// empty email is treated the same way. The caller is expected to pass a
/// non-empty `email`; its format is not checked here.
#[instrument(skip(store))]
pub async fn fetch_user<S>(email: &str, table: &str, store: &S) -> Result<Option<User>, UserError>
where
    S: KeyValueStore + ?Sized,
{
    let item = store
        .get_item(table, Key::new(User::KEY_ATTRIBUTE, email))
        .await
        .map_err(|e| {
            warn!(error = %e, "Fetch failed");
            UserError::FetchFailed
        })?;

    let user: User = unmarshal_item(item.unwrap_or_default()).map_err(|e| {
        warn!(error = %e, "Stored user does not decode");
        UserError::UnmarshalFailed
    })?;

    let found = !user.email.is_empty();
    debug!(found, "Fetched");
    Ok(found.then_some(user))
}

/// Lists every user in the table.
#[instrument(skip(store))]
pub async fn fetch_users<S>(table: &str, store: &S) -> Result<Vec<User>, UserError>
where
    S: KeyValueStore + ?Sized,
{
    let items = store.scan(table).await.map_err(|e| {
        warn!(error = %e, "Scan failed");
        UserError::FetchFailed
    })?;

    let users: Vec<User> = unmarshal_items(items).map_err(|e| {
        warn!(error = %e, "Stored user does not decode");
        UserError::UnmarshalFailed
    })?;

    debug!(count = users.len(), "Listed");
    Ok(users)
}

/// Creates a user from a JSON request body.
///
/// The email must be valid and not already present.
#[instrument(skip(body, store))]
pub async fn create_user<S>(body: &str, table: &str, store: &S) -> Result<User, UserError>
where
    S: KeyValueStore + ?Sized,
{
    let user = decode_body(body)?;

    if !is_email_valid(&user.email) {
        debug!(email = %user.email, "Rejected email");
        return Err(UserError::InvalidEmail);
    }

    match fetch_user(&user.email, table, store).await {
        Ok(Some(_)) => return Err(UserError::UserAlreadyExists),
        Ok(None) => {}
        Err(e) => {
            warn!(
                email = %user.email,
                error = %e,
                "Existence check failed, relying on conditional put"
            );
        }
    }

    write_user(&user, table, store, PutCondition::IfAbsent)
        .await
        .map_err(|e| match e {
            WriteError::Condition => UserError::UserAlreadyExists,
            WriteError::User(e) => e,
        })?;

    info!(email = %user.email, "Created");
    Ok(user)
}

/// Replaces an existing user with the record in the JSON request body.
///
/// This is a full overwrite keyed by email: fields missing from the body are
/// stored empty. The email format is not re-validated.
///
/// A body without `email` is not rejected up front: the store refuses the
/// empty key on both the read and the put, so the caller gets
/// [`UserError::PutFailed`].
#[instrument(skip(body, store))]
pub async fn update_user<S>(body: &str, table: &str, store: &S) -> Result<User, UserError>
where
    S: KeyValueStore + ?Sized,
{
    let user = decode_body(body)?;

    match fetch_user(&user.email, table, store).await {
        Ok(None) => return Err(UserError::UserDoesNotExist),
        Ok(Some(_)) => {}
        Err(e) => {
            warn!(
                email = %user.email,
                error = %e,
                "Existence check failed, relying on conditional put"
            );
        }
    }

    write_user(&user, table, store, PutCondition::IfPresent)
        .await
        .map_err(|e| match e {
            WriteError::Condition => UserError::UserDoesNotExist,
            WriteError::User(e) => e,
        })?;

    info!(email = %user.email, "Updated");
    Ok(user)
}

/// Deletes the user with this email. Deleting an absent user succeeds.
#[instrument(skip(store))]
pub async fn delete_user<S>(email: &str, table: &str, store: &S) -> Result<(), UserError>
where
    S: KeyValueStore + ?Sized,
{
    store
        .delete_item(table, Key::new(User::KEY_ATTRIBUTE, email))
        .await
        .map_err(|e| {
            warn!(error = %e, "Delete failed");
            UserError::DeleteFailed
        })?;

    info!("Deleted");
    Ok(())
}

fn decode_body(body: &str) -> Result<User, UserError> {
    serde_json::from_str(body).map_err(|e| {
        debug!(error = %e, "Body is not a user");
        UserError::InvalidUserData
    })
}

enum WriteError {
    /// The put condition did not hold.
    Condition,
    User(UserError),
}

async fn write_user<S>(
    user: &User,
    table: &str,
    store: &S,
    condition: PutCondition,
) -> Result<(), WriteError>
where
    S: KeyValueStore + ?Sized,
{
    let item = marshal_item(user).map_err(|e| {
        warn!(error = %e, "Marshal failed");
        WriteError::User(UserError::MarshalFailed)
    })?;

    store
        .put_item(table, item, condition)
        .await
        .map_err(|e| match e {
            StoreError::ConditionFailed(_) => WriteError::Condition,
            e => {
                warn!(error = %e, "Put failed");
                WriteError::User(UserError::PutFailed)
            }
        })
}

//! # Request Dispatch
//!
//! Routes an [`ApiRequest`] to a [`users`](crate::users) operation by HTTP
//! method and turns the outcome into an [`ApiResponse`].
//!
//! | Method | Operation | Success |
//! |---|---|---|
//! | `GET` with `?email=` | [`fetch_user`] | 200, the user (404 if absent) |
//! | `GET` | [`fetch_users`] | 200, list of users |
//! | `POST` | [`create_user`] | 201, the created user |
//! | `PUT` | [`update_user`] | 200, the updated user |
//! | `DELETE` with `?email=` | [`delete_user`] | 200, `null` |
//!
//! Any other method gets 405. Errors are returned as `{"error": "..."}`
//! with the status from [`status_code`].

pub mod api_response;

pub use api_response::*;

use crate::store::KeyValueStore;
use crate::users::{
    create_user, delete_user, fetch_user, fetch_users, update_user, UserError,
};
use tracing::{debug, instrument, warn};

/// Message returned for unsupported methods.
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";

/// Message returned for a request line that is not an [`ApiRequest`].
pub const INVALID_REQUEST: &str = "invalid request";

/// Decodes one JSON request line and dispatches it.
///
/// A line that does not decode, including one without `httpMethod`, gets a
/// 400 and never reaches the store.
pub async fn handle_line<S>(line: &str, table: &str, store: &S) -> ApiResponse
where
    S: KeyValueStore + ?Sized,
{
    match serde_json::from_str::<ApiRequest>(line) {
        Ok(request) => handle(&request, table, store).await,
        Err(e) => {
            warn!(error = %e, "Invalid request line");
            api_response(400, &ErrorBody::new(INVALID_REQUEST))
        }
    }
}

/// Dispatches one request against `table`.
#[instrument(skip(request, store), fields(method = %request.http_method))]
pub async fn handle<S>(request: &ApiRequest, table: &str, store: &S) -> ApiResponse
where
    S: KeyValueStore + ?Sized,
{
    let response = match request.http_method.as_str() {
        "GET" => get_user(request, table, store).await,
        "POST" => {
            let body = request.body.as_deref().unwrap_or_default();
            create_user(body, table, store)
                .await
                .map(|user| api_response(201, &user))
        }
        "PUT" => {
            let body = request.body.as_deref().unwrap_or_default();
            update_user(body, table, store)
                .await
                .map(|user| api_response(200, &user))
        }
        "DELETE" => {
            let email = request.query("email").unwrap_or_default();
            delete_user(email, table, store)
                .await
                .map(|()| api_response(200, &()))
        }
        _ => Ok(unhandled_method()),
    };

    let response = response.unwrap_or_else(error_response);
    debug!(status = response.status_code, "Responded");
    response
}

async fn get_user<S>(request: &ApiRequest, table: &str, store: &S) -> Result<ApiResponse, UserError>
where
    S: KeyValueStore + ?Sized,
{
    match request.query("email").filter(|e| !e.is_empty()) {
        Some(email) => fetch_user(email, table, store)
            .await?
            .map(|user| api_response(200, &user))
            .ok_or(UserError::UserDoesNotExist),
        None => {
            let users = fetch_users(table, store).await?;
            Ok(api_response(200, &users))
        }
    }
}

/// Response for a method this API does not serve.
pub fn unhandled_method() -> ApiResponse {
    api_response(405, &ErrorBody::new(METHOD_NOT_ALLOWED))
}

/// Status code reported for each error kind.
pub fn status_code(error: &UserError) -> u16 {
    match error {
        UserError::InvalidUserData | UserError::InvalidEmail => 400,
        UserError::UserAlreadyExists => 409,
        UserError::UserDoesNotExist => 404,
        UserError::FetchFailed
        | UserError::UnmarshalFailed
        | UserError::MarshalFailed
        | UserError::PutFailed
        | UserError::DeleteFailed => 500,
    }
}

/// Builds the `{"error": ...}` response for `error`.
pub fn error_response(error: UserError) -> ApiResponse {
    api_response(status_code(&error), &ErrorBody::new(error))
}

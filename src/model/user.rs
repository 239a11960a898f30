use serde::{Deserialize, Serialize};

/// Represents a registered user in the system.
///
/// The wire and stored field names are camelCase (`email`, `firstName`,
/// `lastName`). Missing fields decode to empty strings, so an empty item
/// decodes to `User::default()`.
///
/// `email` is the table key. A `User` handed back by
/// [`fetch_user`](crate::users::fetch_user) always has a non-empty email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `email` - User's email address, also the lookup key
    /// * `first_name` - Display first name
    /// * `last_name` - Display last name
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The attribute name the users table is keyed on.
    pub const KEY_ATTRIBUTE: &'static str = "email";
}

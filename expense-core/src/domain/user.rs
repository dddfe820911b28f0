//! User domain model

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by `POST login/`
///
/// The token is opaque; it is only ever echoed back in the
/// `Authorization: Token <token>` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub token: String,
}

impl User {
    pub fn new(user_id: i64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
        }
    }

    /// Value of the `Authorization` header for this user
    pub fn authorization(&self) -> String {
        format!("Token {}", self.token)
    }
}

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

impl UserCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

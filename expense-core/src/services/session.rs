//! Session service - the in-memory authentication token
//!
//! The logged-in user lives only as long as this service. Nothing is written
//! to disk.

use std::sync::{Arc, RwLock};

use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::ports::ExpenseApi;

pub struct SessionService {
    api: Arc<dyn ExpenseApi>,
    user: RwLock<Option<User>>,
}

impl SessionService {
    pub fn new(api: Arc<dyn ExpenseApi>) -> Self {
        Self {
            api,
            user: RwLock::new(None),
        }
    }

    /// Authenticate and keep the returned user for later calls
    ///
    /// A failed login leaves any previous session untouched.
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self.api.login(username, password)?;
        self.set_user(user.clone());
        Ok(user)
    }

    /// Adopt a user obtained elsewhere (e.g. a token from the environment)
    pub fn set_user(&self, user: User) {
        if let Ok(mut current) = self.user.write() {
            *current = Some(user);
        }
    }

    pub fn logout(&self) {
        if let Ok(mut current) = self.user.write() {
            *current = None;
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().ok().and_then(|u| u.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// The logged-in user, or `Error::NotLoggedIn`
    pub fn require_user(&self) -> Result<User> {
        self.current_user()
            .ok_or_else(|| Error::NotLoggedIn("log in before calling the API".to_string()))
    }
}

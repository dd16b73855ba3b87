use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use crate::error::AuthError;

/// Account every store starts with.
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";

/// In-memory username to password mapping.
///
/// Comparison is exact and case-sensitive. There is no hashing, lockout, or
/// persistence.
pub struct CredentialStore {
    users: RwLock<HashMap<String, String>>,
}

impl CredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded with the default admin account
    pub fn with_default_account() -> Self {
        let store = Self::new();
        store
            .users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(DEFAULT_USERNAME.to_string(), DEFAULT_PASSWORD.to_string());
        store
    }

    /// Add a new account. Existing usernames are left untouched.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(username) {
            debug!(user = %username, "Registration rejected, user exists");
            return Err(AuthError::DuplicateUser(username.to_string()));
        }
        users.insert(username.to_string(), password.to_string());
        info!(user = %username, "User registered");
        Ok(())
    }

    /// Check a username/password pair
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        match users.get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Check if an account exists for a username
    pub fn contains(&self, username: &str) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::with_default_account()
    }
}

//! Per-session context.
//!
//! `MealContext` bundles a shared `CredentialStore` with one `Session` and is
//! passed explicitly to every login, register, logout and recommend call.

use std::sync::Arc;

use tracing::warn;

use crate::auth::{CredentialStore, Session};
use crate::catalog::{HealthCondition, MealEntry};
use crate::error::AuthError;
use crate::recommend::{self, Budget};

pub struct MealContext {
    store: Arc<CredentialStore>,
    session: Session,
}

impl MealContext {
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self {
            store,
            session: Session::new(),
        }
    }

    /// Context over a fresh store holding only the default account
    pub fn with_default_store() -> Self {
        Self::new(Arc::new(CredentialStore::with_default_account()))
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Register a new account. Does not sign it in.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        self.store.register(username, password)
    }

    /// Authenticate and, on success, sign the user in
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        match self.store.authenticate(username, password) {
            Ok(()) => {
                self.session.login(username);
                Ok(())
            }
            Err(e) => {
                warn!(user = %username, "Login failed");
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Filter the catalog for the signed-in user
    pub fn recommend(
        &self,
        condition: HealthCondition,
        budget: Budget,
    ) -> Result<Vec<&'static MealEntry>, AuthError> {
        if !self.session.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        Ok(recommend::recommend(condition, budget))
    }
}

use chrono::{DateTime, Utc};
use tracing::info;

/// Sign-in state for one running session. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<String>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `username` as signed in, replacing any previous user
    pub fn login(&mut self, username: &str) {
        self.current_user = Some(username.to_string());
        self.signed_in_at = Some(Utc::now());
        info!(user = %username, "Session started");
    }

    /// Clear the session
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user = %user, "Session ended");
        }
        self.signed_in_at = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }
}

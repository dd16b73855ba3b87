use thiserror::Error;

use crate::recommend::{MAX_BUDGET, MIN_BUDGET};

/// Errors from registration, login, and session checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,
}

/// Errors from validating recommendation inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Unrecognized health condition: {0}")]
    InvalidCondition(String),

    #[error("Budget must be between {min} and {max}, got {0}", min = MIN_BUDGET, max = MAX_BUDGET)]
    InvalidBudget(i64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MealError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl MealError {
    /// Short message suitable for a form's error line.
    pub fn user_message(&self) -> String {
        match self {
            MealError::Auth(AuthError::DuplicateUser(_)) => "User already exists!".to_string(),
            MealError::Auth(AuthError::InvalidCredentials) => "Invalid credentials!".to_string(),
            MealError::Auth(AuthError::NotAuthenticated) => "Please log in first".to_string(),
            MealError::Recommend(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_budget_message_names_range() {
        let msg = RecommendError::InvalidBudget(50).to_string();
        assert_eq!(msg, "Budget must be between 1000 and 10000, got 50");
    }

    #[test]
    fn test_user_message() {
        let dup: MealError = AuthError::DuplicateUser("admin".into()).into();
        assert_eq!(dup.user_message(), "User already exists!");

        let bad: MealError = AuthError::InvalidCredentials.into();
        assert_eq!(bad.user_message(), "Invalid credentials!");

        let cond: MealError = RecommendError::InvalidCondition("Gout".into()).into();
        assert_eq!(cond.user_message(), "Unrecognized health condition: Gout");
    }
}

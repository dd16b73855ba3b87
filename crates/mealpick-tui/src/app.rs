//! Application state management for mealpick.
//!
//! This module contains the `App` struct that owns the session context, the
//! login form, and the current condition/budget selection with its results.

use anyhow::Result;
use tracing::{debug, info};

use mealpick_core::recommend::{BUDGET_PAGE_STEP, BUDGET_STEP, MAX_BUDGET, MIN_BUDGET};
use mealpick_core::{Budget, Config, HealthCondition, MealContext, MealEntry, MealError};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Shown when the filter finds nothing.
pub const NO_MATCHES_NOTICE: &str =
    "No meals match your health condition and budget. Try adjusting the budget or health condition.";

// ============================================================================
// UI State Types
// ============================================================================

/// Panel that receives arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Conditions,
    Budget,
    Meals,
}

impl Focus {
    /// Get the next panel (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Focus::Conditions => Focus::Budget,
            Focus::Budget => Focus::Meals,
            Focus::Meals => Focus::Conditions,
        }
    }

    /// Get the previous panel (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Focus::Conditions => Focus::Meals,
            Focus::Budget => Focus::Conditions,
            Focus::Meals => Focus::Budget,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    LoggingIn,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Whether the login form signs in or registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Login,
    SignUp,
}

impl LoginMode {
    pub fn title(&self) -> &'static str {
        match self {
            LoginMode::Login => "Login",
            LoginMode::SignUp => "Sign Up",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            LoginMode::Login => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::Login,
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub config: Config,
    pub context: MealContext,

    // UI State
    pub state: AppState,
    pub focus: Focus,

    // Login form state
    pub login_mode: LoginMode,
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    pub login_notice: Option<String>,

    // Form selection
    pub condition: HealthCondition,
    pub budget: Budget,

    // Filter output for the current selection
    pub recommendations: Vec<&'static MealEntry>,
    pub meal_selection: usize,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, context: MealContext, username: Option<String>) -> Self {
        let condition = config.initial_condition();
        let budget = config.initial_budget();
        debug!(%condition, budget = budget.amount(), "Form defaults loaded");

        let mut app = Self {
            config,
            context,

            state: AppState::Normal,
            focus: Focus::Conditions,

            login_mode: LoginMode::Login,
            login_username: username.unwrap_or_default(),
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,
            login_notice: None,

            condition,
            budget,

            recommendations: Vec::new(),
            meal_selection: 0,

            status_message: None,
        };
        app.refresh_recommendations();
        app
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.context.session().is_authenticated()
    }

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Flip between Login and Sign Up on the login overlay
    pub fn toggle_login_mode(&mut self) {
        self.login_mode = self.login_mode.toggle();
        self.login_error = None;
        self.login_notice = None;
        self.login_password.clear();
        self.login_focus = LoginFocus::Username;
    }

    /// Submit the login form in its current mode
    pub fn submit_login_form(&mut self) -> Result<()> {
        match self.login_mode {
            LoginMode::Login => self.attempt_login(),
            LoginMode::SignUp => self.attempt_register(),
        }
    }

    fn take_form_fields(&mut self) -> Result<(String, String)> {
        let username = self.login_username.clone();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return Err(anyhow::anyhow!("Username and password required"));
        }

        self.login_error = None;
        self.login_notice = None;
        Ok((username, password))
    }

    /// Attempt login with the credentials from the login form
    pub fn attempt_login(&mut self) -> Result<()> {
        let (username, password) = self.take_form_fields()?;

        match self.context.login(&username, &password) {
            Ok(()) => {
                self.login_password.clear();
                self.state = AppState::Normal;
                self.status_message = Some(format!("Welcome {}!", username));
                self.refresh_recommendations();
                info!(user = %username, "Login successful");
                Ok(())
            }
            Err(e) => {
                self.login_error = Some(MealError::from(e.clone()).user_message());
                Err(e.into())
            }
        }
    }

    /// Register the form's username/password. Stays on the overlay in Login mode.
    pub fn attempt_register(&mut self) -> Result<()> {
        let (username, password) = self.take_form_fields()?;

        match self.context.register(&username, &password) {
            Ok(()) => {
                self.login_mode = LoginMode::Login;
                self.login_password.clear();
                self.login_focus = LoginFocus::Password;
                self.login_notice = Some("User registered! You can now log in.".to_string());
                Ok(())
            }
            Err(e) => {
                self.login_error = Some(MealError::from(e.clone()).user_message());
                Err(e.into())
            }
        }
    }

    /// End the session and return to the login overlay
    pub fn logout(&mut self) {
        self.context.logout();
        self.login_password.clear();
        self.login_mode = LoginMode::Login;
        self.login_notice = None;
        self.recommendations.clear();
        self.meal_selection = 0;
        self.status_message = Some("Logged out".to_string());
        self.start_login();
    }

    // =========================================================================
    // Form selection
    // =========================================================================

    pub fn select_condition(&mut self, condition: HealthCondition) {
        if self.condition != condition {
            self.condition = condition;
            self.refresh_recommendations();
        }
    }

    pub fn next_condition(&mut self) {
        self.select_condition(self.condition.next());
    }

    pub fn prev_condition(&mut self) {
        self.select_condition(self.condition.prev());
    }

    /// Move the budget by `delta`, clamped to the allowed range
    pub fn adjust_budget(&mut self, delta: i64) {
        let stepped = self.budget.step(delta);
        if stepped != self.budget {
            self.budget = stepped;
            self.refresh_recommendations();
        }
    }

    pub fn budget_up(&mut self) {
        self.adjust_budget(i64::from(BUDGET_STEP));
    }

    pub fn budget_down(&mut self) {
        self.adjust_budget(-i64::from(BUDGET_STEP));
    }

    pub fn budget_page_up(&mut self) {
        self.adjust_budget(i64::from(BUDGET_PAGE_STEP));
    }

    pub fn budget_page_down(&mut self) {
        self.adjust_budget(-i64::from(BUDGET_PAGE_STEP));
    }

    pub fn budget_min(&mut self) {
        self.adjust_budget(i64::from(MIN_BUDGET) - i64::from(self.budget.amount()));
    }

    pub fn budget_max(&mut self) {
        self.adjust_budget(i64::from(MAX_BUDGET) - i64::from(self.budget.amount()));
    }

    /// Re-run the filter for the current selection.
    /// Signed-out sessions get an empty list.
    pub fn refresh_recommendations(&mut self) {
        self.recommendations = self
            .context
            .recommend(self.condition, self.budget)
            .unwrap_or_default();
        self.meal_selection = self
            .meal_selection
            .min(self.recommendations.len().saturating_sub(1));
    }

    pub fn select_next_meal(&mut self) {
        if self.meal_selection + 1 < self.recommendations.len() {
            self.meal_selection += 1;
        }
    }

    pub fn select_prev_meal(&mut self) {
        self.meal_selection = self.meal_selection.saturating_sub(1);
    }

    /// Who is signed in, and since when, for the status bar
    pub fn session_summary(&self) -> Option<String> {
        let session = self.context.session();
        let user = session.current_user()?;
        Some(match session.signed_in_at() {
            Some(at) => format!(
                "Signed in as {} since {}",
                user,
                at.with_timezone(&chrono::Local).format("%H:%M")
            ),
            None => format!("Signed in as {}", user),
        })
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{can_add_password_char, can_add_username_char, App, AppState, Focus, LoginFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle login overlay
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key);
    }

    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('l') => {
            app.logout();
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
        }
        KeyCode::Left | KeyCode::Char('-') => app.budget_down(),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => app.budget_up(),
        KeyCode::PageDown => app.budget_page_down(),
        KeyCode::PageUp => app.budget_page_up(),
        KeyCode::Home => app.budget_min(),
        KeyCode::End => app.budget_max(),
        KeyCode::Up | KeyCode::Char('k') => handle_vertical(app, -1),
        KeyCode::Down | KeyCode::Char('j') => handle_vertical(app, 1),
        KeyCode::Esc => {
            app.status_message = None;
        }
        _ => {}
    }

    Ok(false)
}

/// Up/down moves whatever the focused panel holds
fn handle_vertical(app: &mut App, direction: i8) {
    match (app.focus, direction > 0) {
        (Focus::Conditions, true) => app.next_condition(),
        (Focus::Conditions, false) => app.prev_condition(),
        (Focus::Budget, true) => app.budget_down(),
        (Focus::Budget, false) => app.budget_up(),
        (Focus::Meals, true) => app.select_next_meal(),
        (Focus::Meals, false) => app.select_prev_meal(),
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl+S and F2 flip between Login and Sign Up
    if key.code == KeyCode::F(2)
        || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.toggle_login_mode();
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password | LoginFocus::Button => {
                // On failure login_error is set and the overlay stays up
                let _ = app.submit_login_form();
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.chars().count(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoginMode;
    use mealpick_core::{Config, HealthCondition, MealContext};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_input(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn login_screen() -> App {
        let mut app = App::new(Config::default(), MealContext::with_default_store(), None);
        app.start_login();
        app
    }

    fn log_in(app: &mut App) {
        type_text(app, "admin");
        handle_input(app, key(KeyCode::Enter)).unwrap();
        type_text(app, "admin123");
        handle_input(app, key(KeyCode::Enter)).unwrap();
    }

    #[test]
    fn test_typed_login() {
        let mut app = login_screen();
        log_in(&mut app);
        assert!(app.is_authenticated());
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_typed_login_with_backspace_correction() {
        let mut app = login_screen();
        type_text(&mut app, "adminx");
        handle_input(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.login_username, "admin");
    }

    #[test]
    fn test_wrong_password_keeps_overlay() {
        let mut app = login_screen();
        type_text(&mut app, "admin");
        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "nope");
        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.login_focus, LoginFocus::Button);
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.login_error.as_deref(), Some("Invalid credentials!"));
    }

    #[test]
    fn test_f2_switches_to_sign_up() {
        let mut app = login_screen();
        handle_input(&mut app, key(KeyCode::F(2))).unwrap();
        assert_eq!(app.login_mode, LoginMode::SignUp);

        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        handle_input(&mut app, ctrl_s).unwrap();
        assert_eq!(app.login_mode, LoginMode::Login);
        assert!(app.login_username.is_empty());
    }

    #[test]
    fn test_esc_on_login_quits() {
        let mut app = login_screen();
        assert!(handle_input(&mut app, key(KeyCode::Esc)).unwrap());
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_budget_and_condition_keys() {
        let mut app = login_screen();
        log_in(&mut app);

        handle_input(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.condition, HealthCondition::Hypertension);

        handle_input(&mut app, key(KeyCode::PageUp)).unwrap();
        assert_eq!(app.budget.amount(), 4000);
        handle_input(&mut app, key(KeyCode::Right)).unwrap();
        handle_input(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.budget.amount(), 4000);
        assert_eq!(app.recommendations.len(), 3);

        handle_input(&mut app, key(KeyCode::End)).unwrap();
        assert_eq!(app.budget.amount(), 10000);
        handle_input(&mut app, key(KeyCode::Home)).unwrap();
        assert_eq!(app.budget.amount(), 1000);
    }

    #[test]
    fn test_meal_navigation_when_focused() {
        let mut app = login_screen();
        log_in(&mut app);
        // Ulcer at 3000 -> three meals
        for _ in 0..4 {
            handle_input(&mut app, key(KeyCode::Down)).unwrap();
        }
        assert_eq!(app.condition, HealthCondition::Ulcer);

        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::Meals);
        handle_input(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.meal_selection, 1);
        assert_eq!(app.condition, HealthCondition::Ulcer);
    }

    #[test]
    fn test_logout_key() {
        let mut app = login_screen();
        log_in(&mut app);
        handle_input(&mut app, key(KeyCode::Char('l'))).unwrap();
        assert!(!app.is_authenticated());
        assert_eq!(app.state, AppState::LoggingIn);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = login_screen();
        log_in(&mut app);
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))).unwrap());
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = login_screen();
        log_in(&mut app);
        handle_input(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.state, AppState::ShowingHelp);
        // keys other than close are swallowed
        handle_input(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.budget.amount(), 3000);
        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state, AppState::Normal);
    }
}

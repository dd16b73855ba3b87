use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus, LoginMode};

use super::panels;
use super::styles;

const LOGO: [&str; 3] = [
    "   ╔╦╗╔═╗╔═╗╦  ╔═╗╦╔═╗╦╔═",
    "   ║║║║╣ ╠═╣║  ╠═╝║║  ╠╩╗",
    "   ╩ ╩╚═╝╩ ╩╩═╝╩  ╩╚═╝╩ ╩",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    panels::render(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::LoggingIn) {
        render_login_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, styles::title_style())))
        .collect()
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Local Meal Recommendation";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[Tab] focus | [l]ogout | [q]uit";

    let left_text = match (&app.status_message, app.session_summary()) {
        (Some(msg), Some(summary)) => format!(" {} | {} ", msg, summary),
        (Some(msg), None) => format!(" {} ", msg),
        (None, Some(summary)) => format!(" {} ", summary),
        (None, None) => " Not signed in ".to_string(),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 25, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let mut help_text = logo_lines();
    help_text.push(Line::from(Span::styled(
        format!("              version {}", version),
        styles::muted_style(),
    )));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" About", styles::highlight_style())));
    help_text.push(Line::from(Span::styled(
        "  Suggests local meals for a health condition and",
        styles::help_desc_style(),
    )));
    help_text.push(Line::from(Span::styled(
        "  budget, with the foods that condition should avoid.",
        styles::help_desc_style(),
    )));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Navigation", styles::highlight_style())));
    help_text.push(help_row("  Tab       ", "Switch panel"));
    help_text.push(help_row("  ↑/↓       ", "Condition / meal in focused panel"));
    help_text.push(help_row("  ←/→       ", "Budget -/+ 100"));
    help_text.push(help_row("  PgDn/PgUp ", "Budget -/+ 1000"));
    help_text.push(help_row("  Home/End  ", "Budget min/max"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Actions", styles::highlight_style())));
    help_text.push(help_row("  l         ", "Log out"));
    help_text.push(help_row("  q         ", "Quit"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("       Press ", styles::muted_style()),
        Span::styled("?", styles::help_key_style()),
        Span::styled(" or ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

fn render_login_overlay(frame: &mut Frame, app: &App) {
    let has_message = app.login_error.is_some() || app.login_notice.is_some();
    let height = if has_message { 16 } else { 14 };
    let area = centered_rect_fixed(50, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));

    // Mode switch
    let mode_span = |mode: LoginMode| {
        if app.login_mode == mode {
            Span::styled(mode.title(), styles::title_style())
        } else {
            Span::styled(mode.title(), styles::muted_style())
        }
    };
    lines.push(Line::from(vec![
        Span::raw("        "),
        mode_span(LoginMode::Login),
        Span::styled(" | ", styles::muted_style()),
        mode_span(LoginMode::SignUp),
        Span::styled("   [F2] switch", styles::muted_style()),
    ]));
    lines.push(Line::from(""));

    // Username field
    let username_focused = app.login_focus == LoginFocus::Username;
    let username_style = if username_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let username_display = format!("{:<16}", app.login_username);
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("        "),
        Span::styled("Username: [", styles::muted_style()),
        Span::styled(format!("{}{}", username_display, cursor), username_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field
    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_masked: String = "*".repeat(app.login_password.chars().count().min(16));
    let password_display = format!("{:<16}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("        "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Submit button
    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let label = match app.login_mode {
        LoginMode::Login => "Login",
        LoginMode::SignUp => "Register",
    };
    let button_text = if button_focused {
        format!(" ▶ {:^8} ◀ ", label)
    } else {
        format!("   {:^8}   ", label)
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(button_text, button_style),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    } else if let Some(ref notice) = app.login_notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", notice),
            styles::success_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(50, 10, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "   Are you sure you want to quit?",
        styles::highlight_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[Y]", styles::help_key_style()),
        Span::styled(" to quit, ", styles::muted_style()),
        Span::styled("[N]", styles::help_key_style()),
        Span::styled(" to cancel", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealpick_core::{Config, MealContext};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn logged_in_app() -> App {
        let mut app = App::new(Config::default(), MealContext::with_default_store(), None);
        app.login_username = "admin".to_string();
        app.login_password = "admin123".to_string();
        app.attempt_login().unwrap();
        app
    }

    #[test]
    fn test_login_overlay_renders() {
        let mut app = App::new(Config::default(), MealContext::with_default_store(), None);
        app.start_login();
        let screen = draw(&app);
        assert!(screen.contains("Username: ["));
        assert!(screen.contains("Password: ["));
        assert!(screen.contains("Sign Up"));
    }

    #[test]
    fn test_meals_render_after_login() {
        let mut app = logged_in_app();
        app.select_condition(mealpick_core::HealthCondition::Hypertension);
        app.adjust_budget(1000);
        let screen = draw(&app);
        assert!(screen.contains("Eba & Egusi Soup"));
        assert!(screen.contains("High salt"));
        assert!(screen.contains("Signed in as admin"));
    }

    #[test]
    fn test_empty_result_notice() {
        let mut app = logged_in_app();
        app.select_condition(mealpick_core::HealthCondition::Celiac);
        app.budget_min();
        let screen = draw(&app);
        assert!(screen.contains("No meals match your health condition"));
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let outer = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(50, 14, outer);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 10);
    }
}

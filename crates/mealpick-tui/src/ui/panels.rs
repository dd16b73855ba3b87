use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table, TableState,
        Wrap,
    },
    Frame,
};

use mealpick_core::recommend::{MAX_BUDGET, MIN_BUDGET};
use mealpick_core::HealthCondition;

use crate::app::{App, Focus, NO_MATCHES_NOTICE};
use crate::ui::styles;
use crate::utils::{format_naira, truncate_string};

/// Render the form: conditions on the left, budget and meals on the right
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(columns[1]);

    render_conditions(frame, app, columns[0]);
    render_budget(frame, app, right[0]);
    render_meals(frame, app, right[1]);
}

fn render_conditions(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Conditions;

    let items: Vec<ListItem> = HealthCondition::ALL
        .iter()
        .map(|condition| {
            let style = if *condition == app.condition {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            ListItem::new(Line::from(format!(" {}", condition.label()))).style(style)
        })
        .collect();

    let block = Block::default()
        .title(" Health condition ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.condition.index()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_budget(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Budget;
    let amount = app.budget.amount();
    let window = app.budget.window();

    let block = Block::default()
        .title(format!(
            " Budget ({} - {}) ",
            format_naira(MIN_BUDGET),
            format_naira(MAX_BUDGET)
        ))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let ratio = f64::from(amount - MIN_BUDGET) / f64::from(MAX_BUDGET - MIN_BUDGET);
    let gauge = Gauge::default()
        .gauge_style(styles::gauge_style())
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format_naira(amount));
    frame.render_widget(gauge, rows[0]);

    let window_line = Line::from(vec![
        Span::styled(" Matching costs ", styles::muted_style()),
        Span::styled(
            format!(
                "{} - {}",
                format_naira(window.low.ceil() as u32),
                format_naira(window.high.floor() as u32)
            ),
            styles::highlight_style(),
        ),
        Span::styled("   ←/→ ±100  PgUp/PgDn ±1000", styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(window_line), rows[1]);
}

fn render_meals(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Meals;
    let title = format!(
        " Recommended for {} ({}) ",
        app.condition.label(),
        app.recommendations.len()
    );

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    if app.recommendations.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {}", NO_MATCHES_NOTICE), styles::warning_style())),
        ];
        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new([
        Cell::from("Meal"),
        Cell::from("Cost"),
        Cell::from("Foods to avoid"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app
        .recommendations
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.meal_selection && focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Row::new(vec![
                Cell::from(truncate_string(entry.meal, 28)),
                Cell::from(format!("{:>7}", format_naira(entry.cost))),
                Cell::from(Span::styled(entry.avoid, styles::error_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(28),
        Constraint::Length(9),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if focused {
        state.select(Some(app.meal_selection));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
